// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Delimiter stripper: removes prefix/continuation/suffix markers from a
// comment region, returning the inner text with exactly as many lines as it
// was given (line identity is preserved for the boundary extractor).

use regex::Regex;

use crate::syntax::DelimiterSet;

fn strip_prefix_once(line: &str, marker: &str) -> String {
    if marker.is_empty() {
        return line.to_string();
    }
    let re = Regex::new(&format!(r"^\s*{}\s?", regex::escape(marker))).unwrap();
    re.replacen(line, 1, "").to_string()
}

fn strip_suffix_once(line: &str, marker: &str) -> String {
    if marker.is_empty() {
        return line.trim_end().to_string();
    }
    let re = Regex::new(&format!(r"\s*{}\s*$", regex::escape(marker))).unwrap();
    re.replace(line, "").trim_end().to_string()
}

fn strip_open_close(line: &str, open: &str, close: &str) -> String {
    strip_suffix_once(&strip_prefix_once(line, open), close)
}

/// Strips the continuation marker (possibly repeated, optionally followed
/// by one space) plus trailing cruft from the start of a line.
fn strip_continuation(line: &str, marker: &str) -> String {
    if marker.is_empty() {
        return line.trim_end().to_string();
    }
    let last = marker.chars().last().unwrap();
    let re = Regex::new(&format!(r"^\s*{}+\s?", regex::escape(&last.to_string()))).unwrap();
    re.replace(line, "").trim_end().to_string()
}

fn strip_block(lines: &mut [String], open: &str, cont: &str, close: &str) {
    // Several single-line `/* ... */` comments coalesced into one region:
    // each line is independently framed by O and X, not a continuation run.
    if lines.len() > 1 && lines[0].contains(close) {
        for line in lines.iter_mut() {
            *line = strip_open_close(line, open, close);
        }
        return;
    }

    let last = lines.len() - 1;
    lines[0] = strip_prefix_once(&lines[0], open);
    lines[last] = strip_suffix_once(&lines[last], close);

    for line in lines.iter_mut().skip(1) {
        *line = strip_continuation(line, cont);
    }
}

/// Strip delimiters from `region`. Exits with exactly as many lines as it
/// was given; the whole-file sentinel (`Line("")`) is returned unchanged.
pub fn strip(region: &[String], delims: &DelimiterSet) -> Vec<String> {
    let mut out = region.to_vec();
    if out.is_empty() {
        return out;
    }

    match delims {
        DelimiterSet::Line(prefix) if prefix.is_empty() => out,
        DelimiterSet::Line(prefix) => {
            for line in out.iter_mut() {
                *line = strip_continuation(line, prefix);
            }
            out
        }
        DelimiterSet::Block { open, cont, close } => {
            strip_block(&mut out, open, cont, close);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_strip_line_comment() {
        let region = v(&["# hello", "# world"]);
        let got = strip(&region, &DelimiterSet::Line("#".into()));
        assert_eq!(got, v(&["hello", "world"]));
    }

    #[test]
    fn test_strip_preserves_length() {
        let region = v(&["# a", "", "# b", "# c"]);
        let got = strip(&region, &DelimiterSet::Line("#".into()));
        assert_eq!(got.len(), region.len());
    }

    #[test]
    fn test_strip_block_comment_multiline() {
        let region = v(&["/*", " * hello", " * world", " */"]);
        let block = DelimiterSet::Block {
            open: "/*".into(),
            cont: "*".into(),
            close: "*/".into(),
        };
        let got = strip(&region, &block);
        assert_eq!(got, v(&["", "hello", "world", ""]));
    }

    #[test]
    fn test_strip_block_comment_single_line() {
        let region = v(&["/* hello world */"]);
        let block = DelimiterSet::Block {
            open: "/*".into(),
            cont: "*".into(),
            close: "*/".into(),
        };
        let got = strip(&region, &block);
        assert_eq!(got, v(&["hello world"]));
    }

    #[test]
    fn test_strip_block_coalesced_per_line_framing() {
        let region = v(&["/* a */", "/* b */", "/* c */"]);
        let block = DelimiterSet::Block {
            open: "/*".into(),
            cont: "*".into(),
            close: "*/".into(),
        };
        let got = strip(&region, &block);
        assert_eq!(got, v(&["a", "b", "c"]));
    }

    #[test]
    fn test_strip_whole_file_is_noop() {
        let region = v(&["anything", "goes"]);
        let got = strip(&region, &DelimiterSet::whole_file());
        assert_eq!(got, region);
    }
}
