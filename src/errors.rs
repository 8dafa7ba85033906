// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
use std::fmt;
use std::io;
use std::path::PathBuf;

/// What went wrong, separate from the human-readable context `Error` wraps
/// it in. Mirrors the licensed-header insertion tool this crate is built
/// from, which keeps a small `Cause` enum rather than reaching for a derive
/// macro.
enum Cause {
    Io(io::Error),
}

/// A recoverable, per-file error. `unknown-file-type`, `decode-failure`,
/// `boundary-not-found` and `suspicion` are NOT represented here: they are
/// in-band results (empty hit list, `text: vec![]`, a suspicion tag) per the
/// error taxonomy this crate implements. Only `io-failure` and
/// `classifier-build-failure` are real errors.
pub struct ScanError {
    path: PathBuf,
    cause: Cause,
}

impl ScanError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> ScanError {
        ScanError {
            path: path.into(),
            cause: Cause::Io(source),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.path.display())?;
        match &self.cause {
            Cause::Io(err) => err.fmt(f),
        }
    }
}

impl fmt::Debug for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScanError({})", self)
    }
}

impl std::error::Error for ScanError {}

/// Fatal: raised only at `Classifier`/`Taxonomy` construction time, never
/// during a scan, per the classifier-build-failure error kind.
#[derive(Debug)]
pub struct TaxonomyError {
    pub message: String,
}

impl TaxonomyError {
    pub fn new(message: impl Into<String>) -> TaxonomyError {
        TaxonomyError {
            message: message.into(),
        }
    }
}

impl fmt::Display for TaxonomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid taxonomy: {}", self.message)
    }
}

impl std::error::Error for TaxonomyError {}

/// Raised while loading an external `SyntaxTable`/`Taxonomy` override from
/// YAML, for the "supplied by the caller" configuration path.
#[derive(Debug)]
pub enum ConfigError {
    NotFound,
    Io(io::Error),
    Yaml(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound => write!(f, "config file not found"),
            ConfigError::Io(e) => write!(f, "{}", e),
            ConfigError::Yaml(e) => write!(f, "invalid YAML: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> ConfigError {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> ConfigError {
        ConfigError::Yaml(e)
    }
}
