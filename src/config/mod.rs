// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Configuration loading: an optional YAML file overrides the compiled-in
// SyntaxTable/Taxonomy defaults, found by walking up from the current
// directory the same way a project-local `.licensure.yml` is discovered.

use std::env;
use std::fs::File;
use std::path::PathBuf;

use crate::classifier::Taxonomy;
use crate::errors::ConfigError;
use crate::syntax::SyntaxTable;

/// Walks up from the current directory looking for `name`, the same way a
/// project-local `.licensure.yml` override is located.
pub fn find_config_file(name: &str) -> Option<PathBuf> {
    let mut cwd = env::current_dir().ok()?;
    loop {
        cwd.push(name);
        if cwd.exists() {
            return Some(cwd);
        }
        cwd.pop();

        if !cwd.pop() {
            return None;
        }
    }
}

pub fn load_syntax_table(path: &PathBuf) -> Result<SyntaxTable, ConfigError> {
    let f = File::open(path)?;
    Ok(serde_yaml::from_reader(f)?)
}

pub fn load_taxonomy(path: &PathBuf) -> Result<Taxonomy, ConfigError> {
    let f = File::open(path)?;
    Ok(serde_yaml::from_reader(f)?)
}

/// Loads `.slic.yml`'s `syntax_table`/`taxonomy` overrides if present,
/// falling back to the compiled-in defaults for whichever (or both) are
/// absent.
pub fn load_or_default() -> (SyntaxTable, Taxonomy) {
    let syntax_table = find_config_file(".slic-syntax.yml")
        .and_then(|p| load_syntax_table(&p).ok())
        .unwrap_or_else(crate::syntax::default_table);

    let taxonomy = find_config_file(".slic-taxonomy.yml")
        .and_then(|p| load_taxonomy(&p).ok())
        .unwrap_or_else(crate::classifier::taxonomy_data::default_taxonomy);

    (syntax_table, taxonomy)
}
