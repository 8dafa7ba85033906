// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

pub mod scanner;
pub mod stripper;

pub use scanner::{next_comment, CommentScanner, ScanBounds};
pub use stripper::strip;

/// A contiguous line range that constitutes one comment under a given
/// delimiter set, plus its delimiter-stripped inner text.
#[derive(Debug, Clone)]
pub struct CommentRegion {
    pub start_line: usize,
    pub end_line: usize,
    pub inner: Vec<String>,
}
