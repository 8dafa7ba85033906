// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Result aggregator: folds per-file LicenseHits into a deduplicated,
// cross-file index keyed by (tag, text-fingerprint). Built to be sharded:
// each worker owns one Aggregator and shards are merged at the end, so the
// hot path never touches a shared mutex.

use std::collections::{BTreeSet, HashMap};

use md5::{Digest, Md5};

use crate::hit::{AggregatedEntry, LicenseHit};
use crate::normalize::collapse;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Key {
    WithText(String, [u8; 16]),
    TagOnly(String),
}

/// Whitespace- and digit-insensitive digest of license text, used so
/// reformatting or a differing copyright year doesn't split one license
/// into two aggregation buckets.
pub fn fingerprint(text: &[String]) -> [u8; 16] {
    let joined = text.join(" ");
    let filtered: String = joined
        .chars()
        .filter(|c| !matches!(c, '*' | '.' | ',' | '-') && !c.is_ascii_digit())
        .collect();
    let collapsed = collapse(&filtered).to_lowercase();
    let ascii: String = collapsed.chars().filter(char::is_ascii).collect();

    let digest = Md5::digest(ascii.as_bytes());
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest);
    out
}

fn key_for(hit: &LicenseHit) -> Key {
    match &hit.text {
        Some(text) if !text.is_empty() => Key::WithText(hit.tag.clone(), fingerprint(text)),
        _ => Key::TagOnly(hit.tag.clone()),
    }
}

/// A deduplicated cross-file license index. Order-insensitive: adding the
/// same hits in any order, or merging shards built in any order, produces
/// an equal map.
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: HashMap<Key, AggregatedEntry>,
}

impl Aggregator {
    pub fn new() -> Aggregator {
        Aggregator::default()
    }

    pub fn add(&mut self, path: impl Into<String>, hit: LicenseHit) {
        let path = path.into();
        let key = key_for(&hit);

        self.entries
            .entry(key)
            .and_modify(|entry| {
                if !entry.files.contains(&path) {
                    entry.files.push(path.clone());
                }
                entry.copyrights.extend(hit.copyrights.iter().cloned());
            })
            .or_insert_with(|| AggregatedEntry {
                tag: hit.tag.clone(),
                text: hit.text.clone().unwrap_or_default(),
                copyrights: hit.copyrights.clone(),
                files: vec![path],
            });
    }

    /// Folds another shard's entries into this one. Used to combine
    /// per-worker aggregators after a parallel scan.
    pub fn merge(&mut self, other: Aggregator) {
        for (key, incoming) in other.entries {
            self.entries
                .entry(key)
                .and_modify(|entry| {
                    for f in &incoming.files {
                        if !entry.files.contains(f) {
                            entry.files.push(f.clone());
                        }
                    }
                    entry.copyrights.extend(incoming.copyrights.iter().cloned());
                })
                .or_insert(incoming);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the aggregator, returning its entries sorted by tag then
    /// first file, for deterministic report output.
    pub fn into_sorted_entries(self) -> Vec<AggregatedEntry> {
        let mut out: Vec<AggregatedEntry> = self.entries.into_values().collect();
        out.sort_by(|a, b| {
            a.tag
                .cmp(&b.tag)
                .then_with(|| a.files.first().cmp(&b.files.first()))
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_with_text(tag: &str, text: &[&str]) -> LicenseHit {
        let mut h = LicenseHit::new(tag);
        h.text = Some(text.iter().map(|s| s.to_string()).collect());
        h
    }

    #[test]
    fn test_fingerprint_ignores_digits_and_punctuation() {
        let a = fingerprint(&["Copyright 2020 Jane Doe.".to_string()]);
        let b = fingerprint(&["copyright 2021 jane doe".to_string()]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_differs_on_substantive_text() {
        let a = fingerprint(&["Permission is granted".to_string()]);
        let b = fingerprint(&["Permission is denied".to_string()]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_add_merges_same_fingerprint_across_files() {
        let mut agg = Aggregator::new();
        agg.add("a.rs", hit_with_text("MIT", &["Permission is hereby granted."]));
        agg.add("b.rs", hit_with_text("MIT", &["permission is hereby granted"]));
        assert_eq!(agg.len(), 1);
        let entries = agg.into_sorted_entries();
        assert_eq!(entries[0].files, vec!["a.rs".to_string(), "b.rs".to_string()]);
    }

    #[test]
    fn test_add_keeps_distinct_text_separate() {
        let mut agg = Aggregator::new();
        agg.add("a.rs", hit_with_text("MIT", &["one version of the text"]));
        agg.add("b.rs", hit_with_text("MIT", &["a completely different text"]));
        assert_eq!(agg.len(), 2);
    }

    #[test]
    fn test_no_text_hits_key_by_tag_only() {
        let mut agg = Aggregator::new();
        agg.add("a.rs", LicenseHit::new("suspiciousAndroid"));
        agg.add("b.rs", LicenseHit::new("suspiciousAndroid"));
        assert_eq!(agg.len(), 1);
    }

    #[test]
    fn test_union_merges_copyrights() {
        let mut agg = Aggregator::new();
        let mut h1 = hit_with_text("MIT", &["text"]);
        h1.copyrights.insert("Copyright 2020 Jane".to_string());
        let mut h2 = hit_with_text("MIT", &["text"]);
        h2.copyrights.insert("Copyright 2021 John".to_string());
        agg.add("a.rs", h1);
        agg.add("b.rs", h2);
        let entries = agg.into_sorted_entries();
        assert_eq!(entries[0].copyrights.len(), 2);
    }

    #[test]
    fn test_order_insensitive_aggregation() {
        let mut forward = Aggregator::new();
        forward.add("a.rs", hit_with_text("MIT", &["text"]));
        forward.add("b.rs", hit_with_text("BSD-3-Clause", &["other text"]));

        let mut backward = Aggregator::new();
        backward.add("b.rs", hit_with_text("BSD-3-Clause", &["other text"]));
        backward.add("a.rs", hit_with_text("MIT", &["text"]));

        assert_eq!(forward.into_sorted_entries(), backward.into_sorted_entries());
    }

    #[test]
    fn test_merge_combines_shards() {
        let mut shard1 = Aggregator::new();
        shard1.add("a.rs", hit_with_text("MIT", &["text"]));
        let mut shard2 = Aggregator::new();
        shard2.add("b.rs", hit_with_text("MIT", &["text"]));

        shard1.merge(shard2);
        assert_eq!(shard1.len(), 1);
        assert_eq!(shard1.into_sorted_entries()[0].files.len(), 2);
    }
}
