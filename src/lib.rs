// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Detects and extracts open source license text and copyright notices
// from source files: comment discovery, delimiter stripping, hierarchical
// classification against a license taxonomy, and boundary extraction.

pub mod aggregator;
pub mod boundary;
pub mod classifier;
pub mod comments;
pub mod config;
pub mod errors;
pub mod hit;
pub mod normalize;
pub mod orchestrator;
pub mod syntax;

pub use aggregator::Aggregator;
pub use classifier::taxonomy_data::default_taxonomy;
pub use classifier::{Classifier, Taxonomy};
pub use errors::ScanError;
pub use hit::{AggregatedEntry, LicenseHit};
pub use orchestrator::licenses_in;
pub use syntax::SyntaxTable;
