// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Comment-syntax resolver: maps a path (or its first line, for shebangs) to
// one or more candidate comment-delimiter sets.

mod default;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use default::default_table;

/// One comment syntax: a line prefix, or a block opener/continuation/closer.
/// `Line("")` is the whole-file sentinel: "no comment framing,
/// treat the whole file as one comment region".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DelimiterSet {
    Line(String),
    Block {
        open: String,
        cont: String,
        close: String,
    },
}

impl DelimiterSet {
    pub fn whole_file() -> DelimiterSet {
        DelimiterSet::Line(String::new())
    }

    pub fn is_whole_file(&self) -> bool {
        matches!(self, DelimiterSet::Line(p) if p.is_empty())
    }
}

/// Parses the external config encoding: pipe-separated
/// alternatives, comma-separated members for a block comment, and the
/// two-character sentinel `""` for the whole-file prefix.
pub fn parse_delims(spec: &str) -> Result<Vec<DelimiterSet>, String> {
    spec.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|alt| {
            if alt == "\"\"" {
                return Ok(DelimiterSet::whole_file());
            }
            if alt.contains(',') {
                let parts: Vec<&str> = alt.split(',').map(str::trim).collect();
                if parts.len() != 3 {
                    return Err(format!("block delimiter must have 3 members: {}", alt));
                }
                Ok(DelimiterSet::Block {
                    open: parts[0].to_string(),
                    cont: parts[1].to_string(),
                    close: parts[2].to_string(),
                })
            } else {
                Ok(DelimiterSet::Line(alt.to_string()))
            }
        })
        .collect()
}

/// Extensions that hide a file's real extension, e.g. `.in` in
/// `Makefile.in`. Stripped once before the rest of the probe order runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyntaxTable {
    strip_exts: Vec<String>,
    filename_to_delims: HashMap<String, Vec<DelimiterSet>>,
    ext_to_delims: HashMap<String, Vec<DelimiterSet>>,
    stem_to_delims: HashMap<String, Vec<DelimiterSet>>,
    #[serde(with = "shebang_rules_serde")]
    shebang_rules: Vec<(String, Vec<DelimiterSet>)>,
}

mod shebang_rules_serde {
    use super::DelimiterSet;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        rules: &[(String, Vec<DelimiterSet>)],
        s: S,
    ) -> Result<S::Ok, S::Error> {
        rules.to_vec().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Vec<(String, Vec<DelimiterSet>)>, D::Error> {
        Vec::deserialize(d)
    }
}

impl SyntaxTable {
    pub fn new() -> SyntaxTable {
        SyntaxTable::default()
    }

    pub fn with_strip_ext(mut self, ext: &str) -> SyntaxTable {
        self.strip_exts.push(ext.to_string());
        self
    }

    pub fn with_filename(mut self, name: &str, delims: Vec<DelimiterSet>) -> SyntaxTable {
        self.filename_to_delims.insert(name.to_string(), delims);
        self
    }

    pub fn with_ext(mut self, ext: &str, delims: Vec<DelimiterSet>) -> SyntaxTable {
        self.ext_to_delims.insert(ext.to_string(), delims);
        self
    }

    pub fn with_stem(mut self, stem: &str, delims: Vec<DelimiterSet>) -> SyntaxTable {
        self.stem_to_delims.insert(stem.to_string(), delims);
        self
    }

    /// Shebang regexes are tried in the order added; first match wins.
    pub fn with_shebang(mut self, pattern: &str, delims: Vec<DelimiterSet>) -> SyntaxTable {
        self.shebang_rules.push((pattern.to_string(), delims));
        self
    }

    /// Split a basename into `(stem, ext)` the way `Path::file_stem`/
    /// `extension` do, but keeping the leading dot on `ext` (`os.path.
    /// splitext` semantics) so lookups match the stored keys.
    fn split_ext(basename: &str) -> (String, String) {
        match basename.rfind('.') {
            // A leading dot (dotfile) is not an extension separator.
            Some(i) if i > 0 => (basename[..i].to_string(), basename[i..].to_string()),
            _ => (basename.to_string(), String::new()),
        }
    }

    /// Resolve candidate delimiter sets for `path`. `first_line` should be
    /// the already-decoded first line of the file's content, if available,
    /// so callers that already read the file don't pay for a second I/O.
    /// Returns `None` when the type is unknown (`unknown-file-type`,
    /// not an error).
    pub fn resolve(&self, path: &Path, first_line: Option<&str>) -> Option<Vec<DelimiterSet>> {
        let basename = path.file_name()?.to_str()?;
        let (mut stem, mut ext) = SyntaxTable::split_ext(basename);
        let mut filename = basename.to_string();

        if self.strip_exts.iter().any(|e| e == &ext) {
            filename = stem.clone();
            let (s2, e2) = SyntaxTable::split_ext(&stem);
            stem = s2;
            ext = e2;
        }

        if let Some(d) = self.filename_to_delims.get(&filename) {
            return Some(d.clone());
        }
        if let Some(d) = self.ext_to_delims.get(&ext) {
            return Some(d.clone());
        }
        if let Some(d) = self.stem_to_delims.get(&stem) {
            return Some(d.clone());
        }

        let line = first_line?;
        if !line.starts_with("#!") {
            return None;
        }
        for (pattern, delims) in &self.shebang_rules {
            // Regex is compiled per-lookup since shebang fallback is the
            // rare path; the cost is negligible against one file read.
            if let Ok(re) = Regex::new(pattern) {
                if re.is_match(line) {
                    return Some(delims.clone());
                }
            }
        }
        None
    }

    /// Convenience wrapper that reads the first line itself. I/O errors are
    /// treated as "unknown type", not an error.
    pub fn resolve_path(&self, path: &Path) -> Option<Vec<DelimiterSet>> {
        let first_line = read_first_line(path).ok().flatten();
        self.resolve(path, first_line.as_deref())
    }
}

fn read_first_line(path: &Path) -> io::Result<Option<String>> {
    let f = File::open(path)?;
    let mut reader = BufReader::new(f);
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(p: &str) -> Vec<DelimiterSet> {
        vec![DelimiterSet::Line(p.to_string())]
    }

    #[test]
    fn test_parse_delims_line() {
        assert_eq!(parse_delims("#").unwrap(), line("#"));
    }

    #[test]
    fn test_parse_delims_block() {
        assert_eq!(
            parse_delims("/*, *, */").unwrap(),
            vec![DelimiterSet::Block {
                open: "/*".into(),
                cont: "*".into(),
                close: "*/".into()
            }]
        );
    }

    #[test]
    fn test_parse_delims_whole_file_sentinel() {
        assert_eq!(parse_delims("\"\"").unwrap(), vec![DelimiterSet::whole_file()]);
    }

    #[test]
    fn test_parse_delims_alternatives() {
        let got = parse_delims("/*, *, */|//|#").unwrap();
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn test_resolve_by_extension() {
        let table = SyntaxTable::new().with_ext(".py", line("#"));
        let got = table.resolve(Path::new("foo.py"), None);
        assert_eq!(got, Some(line("#")));
    }

    #[test]
    fn test_resolve_strip_ext_then_extension() {
        let table = SyntaxTable::new()
            .with_strip_ext(".in")
            .with_ext(".sh", line("#"));
        let got = table.resolve(Path::new("configure.sh.in"), None);
        assert_eq!(got, Some(line("#")));
    }

    #[test]
    fn test_resolve_exact_filename_wins_over_extension() {
        let table = SyntaxTable::new()
            .with_filename("Makefile", line("#"))
            .with_ext(".mk", line("dnl"));
        assert_eq!(
            table.resolve(Path::new("Makefile"), None),
            Some(line("#"))
        );
    }

    #[test]
    fn test_resolve_stem_fallback() {
        let table = SyntaxTable::new().with_stem("configure", line("dnl"));
        assert_eq!(
            table.resolve(Path::new("configure"), None),
            Some(line("dnl"))
        );
    }

    #[test]
    fn test_resolve_shebang_fallback() {
        let table = SyntaxTable::new().with_shebang("^#!", line("#"));
        let got = table.resolve(Path::new("myscript"), Some("#!/usr/bin/env python"));
        assert_eq!(got, Some(line("#")));
    }

    #[test]
    fn test_resolve_shebang_env_node_uses_block() {
        let table = SyntaxTable::new()
            .with_shebang("env node", vec![DelimiterSet::Block {
                open: "/*".into(),
                cont: "*".into(),
                close: "*/".into(),
            }])
            .with_shebang("^#!", line("#"));
        let got = table.resolve(Path::new("script"), Some("#!/usr/bin/env node"));
        assert_eq!(
            got,
            Some(vec![DelimiterSet::Block {
                open: "/*".into(),
                cont: "*".into(),
                close: "*/".into()
            }])
        );
    }

    #[test]
    fn test_resolve_unknown_type() {
        let table = SyntaxTable::new();
        assert_eq!(table.resolve(Path::new("foo.xyz"), None), None);
    }
}
