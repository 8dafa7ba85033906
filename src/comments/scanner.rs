// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Comment scanner: walks the line array of a file and yields successive
// comment regions under a given delimiter set.

use crate::syntax::DelimiterSet;

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn starts_with_prefix(line: &str, prefix: &str) -> bool {
    line.trim_start().starts_with(prefix)
}

fn scan_line_comment(lines: &[String], cursor: usize, prefix: &str) -> Option<(usize, usize)> {
    let start = (cursor..lines.len()).find(|&i| starts_with_prefix(&lines[i], prefix))?;

    // A blank line or another prefixed line extends the block (this keeps
    // paragraph breaks inside e.g. `#` comments from splitting the region);
    // the first line that is neither terminates it.
    for i in start..lines.len() {
        let line = &lines[i];
        if !is_blank(line) && !starts_with_prefix(line, prefix) {
            return Some((start, i));
        }
    }
    Some((start, lines.len()))
}

fn scan_block_comment(
    lines: &[String],
    cursor: usize,
    open: &str,
    close: &str,
) -> Option<(usize, usize)> {
    let start = (cursor..lines.len()).find(|&i| lines[i].contains(open))?;

    let mut end = lines.len() - 1;
    let mut found = false;
    for i in start..lines.len() {
        if lines[i].contains(close) {
            end = i;
            found = true;
            break;
        }
    }
    if !found {
        end = lines.len() - 1;
    }
    let mut end_exclusive = end + 1;

    // Single-line `/* ... */` comments immediately adjacent to one another
    // are coalesced into a single region.
    if start == end {
        let mut probe = end_exclusive;
        while probe < lines.len() && lines[probe].contains(open) && lines[probe].contains(close) {
            end_exclusive = probe + 1;
            probe += 1;
        }
    }

    Some((start, end_exclusive))
}

/// Returns the next comment region at or after `cursor`, or `None` when
/// there are no more. For the whole-file delimiter set the entire file is
/// returned exactly once, starting from cursor `0`.
pub fn next_comment(
    lines: &[String],
    cursor: usize,
    delims: &DelimiterSet,
) -> Option<(usize, usize)> {
    match delims {
        DelimiterSet::Line(prefix) if prefix.is_empty() => {
            if cursor == 0 && !lines.is_empty() {
                Some((0, lines.len()))
            } else {
                None
            }
        }
        DelimiterSet::Line(prefix) => scan_line_comment(lines, cursor, prefix),
        DelimiterSet::Block { open, close, .. } => scan_block_comment(lines, cursor, open, close),
    }
}

/// Bounds the scanner's total effort: stop probing past
/// the first `max_start_line` lines of content, or once the gap since the
/// last license-bearing region exceeds `max_gap` lines. The gap is tracked
/// by the caller (the orchestrator), since only it knows which regions
/// produced a hit.
#[derive(Debug, Clone, Copy)]
pub struct ScanBounds {
    pub max_start_line: usize,
    pub max_gap: usize,
}

impl Default for ScanBounds {
    fn default() -> ScanBounds {
        ScanBounds {
            max_start_line: 400,
            max_gap: 200,
        }
    }
}

/// Iterator form of [`next_comment`] for convenient `for` loops; each call
/// advances its cursor to the previous region's exclusive end.
pub struct CommentScanner<'a> {
    lines: &'a [String],
    delims: &'a DelimiterSet,
    cursor: usize,
}

impl<'a> CommentScanner<'a> {
    pub fn new(lines: &'a [String], delims: &'a DelimiterSet) -> CommentScanner<'a> {
        CommentScanner {
            lines,
            delims,
            cursor: 0,
        }
    }
}

impl<'a> Iterator for CommentScanner<'a> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        let (start, end) = next_comment(self.lines, self.cursor, self.delims)?;
        self.cursor = end;
        Some((start, end))
    }
}
