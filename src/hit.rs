// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One license detection within a single file. `text` is `None` when the
/// orchestrator ran without `details`; otherwise it is the verbatim,
/// delimiter-stripped line range of the license block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseHit {
    pub tag: String,
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    pub copyrights: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<Vec<String>>,
}

impl LicenseHit {
    pub fn new(tag: impl Into<String>) -> LicenseHit {
        LicenseHit {
            tag: tag.into(),
            copyrights: BTreeSet::new(),
            text: None,
        }
    }
}

/// One row of the cross-file report: every file found to carry the same
/// `tag` at the same text fingerprint, with their copyrights merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedEntry {
    pub tag: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub text: Vec<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    pub copyrights: BTreeSet<String>,
    pub files: Vec<String>,
}
