// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Per-file orchestrator: reads a bounded prefix of a file, resolves its
// comment syntax, and drives the scanner/stripper/classifier/boundary
// pipeline to produce the file's LicenseHits.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use regex::Regex;

use crate::boundary;
use crate::classifier::Classifier;
use crate::comments::{next_comment, strip, CommentRegion, ScanBounds};
use crate::errors::ScanError;
use crate::hit::LicenseHit;
use crate::normalize::collapse;
use crate::syntax::SyntaxTable;

/// Maximum bytes read from any one file; header-comment license text lives
/// near the top, so K is generous without risking latency on huge files.
pub const MAX_BYTES_READ: usize = 32 * 1024;

fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn android_boilerplate_re() -> Regex {
    Regex::new(r"(?i)Copyright.{0,40}The Android Open Source Project").unwrap()
}

fn licensey_re() -> Regex {
    Regex::new(r"(?i)license|permission|redistribut").unwrap()
}

fn copyright_re() -> Regex {
    Regex::new(r"(?i)copyright").unwrap()
}

/// When no positive detection fires, tags the content so downstream review
/// queues know whether the file plausibly needs a human look.
fn suspicion_tag(raw: &str) -> &'static str {
    if android_boilerplate_re().is_match(raw) {
        "suspiciousAndroid"
    } else if licensey_re().is_match(raw) {
        "suspiciousLicensey"
    } else if copyright_re().is_match(raw) {
        "suspiciousCopyright"
    } else {
        "none"
    }
}

/// Scans comment regions of one delimiter set, classifying and (optionally)
/// extracting boundaries for every region, honoring the scanner's
/// termination bounds. Returns the hits produced and stops as soon as the
/// gap or start-line bound is exceeded.
fn scan_delimiter_set(
    lines: &[String],
    delims: &crate::syntax::DelimiterSet,
    classifier: &Classifier,
    details: bool,
    bounds: &ScanBounds,
) -> Vec<LicenseHit> {
    let mut hits = Vec::new();
    let mut cursor = 0;
    let mut last_hit_end: Option<usize> = None;

    while let Some((start, end)) = next_comment(lines, cursor, delims) {
        cursor = end;

        if start > bounds.max_start_line {
            break;
        }
        if let Some(last) = last_hit_end {
            if start.saturating_sub(last) > bounds.max_gap {
                break;
            }
        }

        let region = CommentRegion {
            start_line: start,
            end_line: end,
            inner: strip(&lines[start..end], delims),
        };
        let single_line = collapse(&region.inner.join(" "));
        let tags = classifier.classify(&single_line);

        if tags.is_empty() {
            continue;
        }
        last_hit_end = Some(region.end_line);

        for tag in tags {
            let mut hit = LicenseHit::new(tag.clone());
            if details {
                if let (Some(start_re), Some(end_re), Some(max_lines)) = (
                    classifier.start_pattern(&tag),
                    classifier.end_pattern(&tag),
                    classifier.max_lines(&tag),
                ) {
                    let extraction = boundary::extract(&region.inner, start_re, end_re, max_lines);
                    hit.copyrights = extraction.copyrights.into_iter().collect::<BTreeSet<_>>();
                    hit.text = Some(extraction.license);
                } else {
                    hit.text = Some(Vec::new());
                }
            }
            hits.push(hit);
        }
    }

    hits
}

/// Detects license(s) in `path`. `details` controls whether the extracted
/// license text/copyrights are populated or omitted (cheaper, tag-only
/// scan). Returns `Ok(vec![])` for unrecognized file types; I/O failures
/// surface as `Err`.
pub fn licenses_in(
    path: &Path,
    syntax_table: &SyntaxTable,
    classifier: &Classifier,
    details: bool,
) -> Result<Vec<LicenseHit>, ScanError> {
    let mut file = File::open(path).map_err(|e| ScanError::io(path, e))?;
    let mut buf = vec![0u8; MAX_BYTES_READ];
    let mut total = 0;
    loop {
        let n = file
            .read(&mut buf[total..])
            .map_err(|e| ScanError::io(path, e))?;
        if n == 0 {
            break;
        }
        total += n;
        if total == buf.len() {
            break;
        }
    }
    buf.truncate(total);

    let content = decode(&buf);
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    let first_line = lines.first().map(String::as_str);

    let Some(delimiter_sets) = syntax_table.resolve(path, first_line) else {
        return Ok(Vec::new());
    };

    let bounds = ScanBounds::default();
    for delims in &delimiter_sets {
        let hits = scan_delimiter_set(&lines, delims, classifier, details, &bounds);
        if !hits.is_empty() {
            return Ok(hits);
        }
    }

    let tag = suspicion_tag(&content);
    Ok(vec![LicenseHit::new(tag)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{taxonomy_data::default_taxonomy, Classifier};
    use crate::syntax::default_table;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str, suffix: &str) -> NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    fn classifier() -> Classifier {
        Classifier::build(default_taxonomy()).unwrap()
    }

    #[test]
    fn test_s1_mpl_short_form_hash_comments() {
        let contents = "# This Source Code Form is subject to the terms of the Mozilla Public\n# License, v. 2.0. If a copy of the MPL was not distributed with this\n# file, You can obtain one at http://mozilla.org/MPL/2.0/.\n";
        let f = write_file(contents, ".py");
        let got = licenses_in(f.path(), &default_table(), &classifier(), true).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].tag, "MPL-2.0");
    }

    #[test]
    fn test_s2_mpl_with_preceding_copyrights_in_block_comment() {
        let contents = "/*\n * Copyright (C) 2010 Fred Bloggs\n * Copyright (C) 2009-2012 George Jones\n *\n * This Source Code Form is subject to the terms of the Mozilla Public\n * License, v. 2.0. http://mozilla.org/MPL/2.0/.\n */\n";
        let f = write_file(contents, ".c");
        let got = licenses_in(f.path(), &default_table(), &classifier(), true).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].tag, "MPL-2.0");
        assert!(got[0].copyrights.contains("Copyright (C) 2010 Fred Bloggs"));
        assert!(got[0]
            .copyrights
            .contains("Copyright (C) 2009-2012 George Jones"));
    }

    #[test]
    fn test_s3_bsd_refines_to_three_clause() {
        let contents = "/*\n * Redistribution and use in source and binary forms, with or without\n * modification, are permitted. Neither the name of the copyright holder\n * nor the names of its contributors may be used.\n * OF THE POSSIBILITY OF SUCH DAMAGE.\n */\n";
        let f = write_file(contents, ".c");
        let got = licenses_in(f.path(), &default_table(), &classifier(), true).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].tag, "BSD-3-Clause");
    }

    #[test]
    fn test_s4_dual_mit_gpl_jquery_header() {
        let contents = "/*!\n * jQuery JavaScript Library v1.11.0\n * Dual licensed under the MIT and GPL licenses:\n * http://jquery.org/license\n */\n";
        let f = write_file(contents, ".js");
        let got = licenses_in(f.path(), &default_table(), &classifier(), true).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].tag, "MIT|GPL-2.0_urlref");
    }

    #[test]
    fn test_s5_android_suspicion() {
        let contents = "// Copyright 2018 The Android Open Source Project\n";
        let f = write_file(contents, ".java");
        let got = licenses_in(f.path(), &default_table(), &classifier(), true).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].tag, "suspiciousAndroid");
    }

    #[test]
    fn test_s6_unknown_extension_returns_empty() {
        let f = write_file("whatever", ".xyz");
        let got = licenses_in(f.path(), &default_table(), &classifier(), true).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn test_details_false_omits_text_and_copyrights() {
        let contents = "# This Source Code Form is subject to the terms of the Mozilla Public\n# License, v. 2.0. If a copy of the MPL was not distributed with this\n# file, You can obtain one at http://mozilla.org/MPL/2.0/.\n";
        let f = write_file(contents, ".py");
        let got = licenses_in(f.path(), &default_table(), &classifier(), false).unwrap();
        assert_eq!(got.len(), 1);
        assert!(got[0].text.is_none());
        assert!(got[0].copyrights.is_empty());
    }

    #[test]
    fn test_no_license_no_suspicion_returns_none_tag() {
        let f = write_file("fn main() {}\n", ".rs");
        let got = licenses_in(f.path(), &default_table(), &classifier(), true).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].tag, "none");
    }

    #[test]
    fn test_io_error_on_missing_file() {
        let got = licenses_in(
            Path::new("/nonexistent/path/does-not-exist.rs"),
            &default_table(),
            &classifier(),
            true,
        );
        assert!(got.is_err());
    }
}
