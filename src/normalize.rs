// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Whitespace normalizer: collapses runs of whitespace to a single space and
// trims the ends. Used everywhere a comparable single-line form of a
// multi-line comment is needed.

/// Collapse every maximal run of whitespace (space, tab, CR, LF, FF) in `s`
/// to a single ASCII space, and trim leading/trailing whitespace.
pub fn collapse(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            in_run = true;
        } else {
            if in_run && !out.is_empty() {
                out.push(' ');
            }
            in_run = false;
            out.push(c);
        }
    }
    out
}

/// Join lines with single spaces and collapse the result, producing the
/// single-line form the classifier matches against.
pub fn collapse_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let joined = lines
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    collapse(&joined)
}
