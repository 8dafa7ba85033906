// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// License classifier: matches the normalized one-line form of a comment
// against a hierarchical taxonomy of license fingerprints and returns the
// set of license tags present. Built once at construction; immutable and
// freely shareable across worker threads after that.

pub mod taxonomy_data;

use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::TaxonomyError;

/// Default cap on license-block length used during end-line search when a
/// rule doesn't specify `max_lines` and no ancestor does either.
pub const DEFAULT_MAX_LINES: usize = 50;

/// Most regex engines impose or perform poorly above ~100 named capture
/// groups in one pattern; each level's alternation is split into chunks no
/// larger than this.
const MAX_GROUPS_PER_REGEX: usize = 80;

/// One node in the classification taxonomy, as supplied by the caller
/// (`LicenseRule`), before compilation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicenseRule {
    pub tag: String,
    pub match_pattern: String,
    #[serde(default)]
    pub start_pattern: Option<String>,
    #[serde(default)]
    pub end_pattern: Option<String>,
    #[serde(default)]
    pub max_lines: Option<usize>,
    /// Tags to suppress from the final result whenever this rule fires. An
    /// empty list means "inherit the parent's cancels", the same rule
    /// `start_pattern`/`end_pattern`/`max_lines` use, so a descendant that
    /// refines this rule still suppresses whatever the ancestor intended to
    /// even though the ancestor's own tag no longer appears in the output.
    #[serde(default)]
    pub cancels: Vec<String>,
    #[serde(default)]
    pub subs: Vec<LicenseRule>,
}

impl LicenseRule {
    pub fn new(tag: &str, match_pattern: &str) -> LicenseRule {
        LicenseRule {
            tag: tag.to_string(),
            match_pattern: match_pattern.to_string(),
            ..Default::default()
        }
    }

    pub fn start(mut self, pattern: &str) -> LicenseRule {
        self.start_pattern = Some(pattern.to_string());
        self
    }

    pub fn end(mut self, pattern: &str) -> LicenseRule {
        self.end_pattern = Some(pattern.to_string());
        self
    }

    pub fn max_lines(mut self, n: usize) -> LicenseRule {
        self.max_lines = Some(n);
        self
    }

    pub fn cancels(mut self, tags: &[&str]) -> LicenseRule {
        self.cancels = tags.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn subs(mut self, subs: Vec<LicenseRule>) -> LicenseRule {
        self.subs = subs;
        self
    }
}

/// The full, uncompiled taxonomy: an ordered set of top-level rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Taxonomy {
    pub roots: Vec<LicenseRule>,
}

impl Taxonomy {
    pub fn new(roots: Vec<LicenseRule>) -> Taxonomy {
        Taxonomy { roots }
    }
}

struct CompiledRule {
    tag: String,
    start_re: Regex,
    end_re: Regex,
    max_lines: usize,
    cancels: Vec<String>,
    children_level: Option<usize>,
}

struct Level {
    members: Vec<(String, usize)>,
    match_regexes: Vec<Regex>,
}

/// A compiled, immutable taxonomy ready to classify comment text. Built once
/// via [`Classifier::build`]; free of interior mutability, so a single
/// instance can be shared (e.g. behind an `Arc`) across worker threads.
pub struct Classifier {
    rules: Vec<CompiledRule>,
    tag_to_index: HashMap<String, usize>,
    levels: Vec<Level>,
    root_level: usize,
}

fn group_label(tag: &str) -> String {
    tag.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

struct Builder {
    rules: Vec<CompiledRule>,
    tag_to_index: HashMap<String, usize>,
    group_labels_seen: HashMap<String, String>,
    levels: Vec<Level>,
}

impl Builder {
    fn compile_level(
        &mut self,
        defs: Vec<LicenseRule>,
        parent_start: Option<&str>,
        parent_end: Option<&str>,
        parent_max_lines: Option<usize>,
        parent_cancels: &[String],
    ) -> Result<usize, TaxonomyError> {
        let mut members = Vec::new();
        let mut match_patterns = Vec::new();

        for def in defs {
            if def.tag.is_empty() {
                return Err(TaxonomyError::new("missing tag in license rule"));
            }
            if def.tag.starts_with('_') {
                return Err(TaxonomyError::new(format!(
                    "tag '{}' begins with the reserved '_' prefix",
                    def.tag
                )));
            }
            if self.tag_to_index.contains_key(&def.tag) {
                return Err(TaxonomyError::new(format!("duplicate tag '{}'", def.tag)));
            }

            let label = group_label(&def.tag);
            if let Some(existing) = self.group_labels_seen.get(&label) {
                return Err(TaxonomyError::new(format!(
                    "group label '{}' collides between '{}' and '{}'",
                    label, existing, def.tag
                )));
            }
            self.group_labels_seen.insert(label.clone(), def.tag.clone());

            let resolved_start = def
                .start_pattern
                .clone()
                .or_else(|| parent_start.map(str::to_string))
                .unwrap_or_else(|| def.match_pattern.clone());
            let resolved_end = def
                .end_pattern
                .clone()
                .or_else(|| parent_end.map(str::to_string))
                .unwrap_or_else(|| def.match_pattern.clone());
            let resolved_max_lines = def
                .max_lines
                .or(parent_max_lines)
                .unwrap_or(DEFAULT_MAX_LINES);
            let resolved_cancels = if def.cancels.is_empty() {
                parent_cancels.to_vec()
            } else {
                def.cancels.clone()
            };

            let start_re = Regex::new(&resolved_start).map_err(|e| {
                TaxonomyError::new(format!("bad start_pattern for '{}': {}", def.tag, e))
            })?;
            let end_re = Regex::new(&resolved_end).map_err(|e| {
                TaxonomyError::new(format!("bad end_pattern for '{}': {}", def.tag, e))
            })?;

            let idx = self.rules.len();
            self.rules.push(CompiledRule {
                tag: def.tag.clone(),
                start_re,
                end_re,
                max_lines: resolved_max_lines,
                cancels: resolved_cancels.clone(),
                children_level: None,
            });
            self.tag_to_index.insert(def.tag.clone(), idx);
            members.push((label.clone(), idx));
            match_patterns.push((label, def.match_pattern.clone()));

            if !def.subs.is_empty() {
                let child_level = self.compile_level(
                    def.subs,
                    Some(&resolved_start),
                    Some(&resolved_end),
                    Some(resolved_max_lines),
                    &resolved_cancels,
                )?;
                self.rules[idx].children_level = Some(child_level);
            }
        }

        let mut match_regexes = Vec::new();
        for chunk in match_patterns.chunks(MAX_GROUPS_PER_REGEX) {
            let alternation = chunk
                .iter()
                .map(|(label, pattern)| format!("(?P<{}>{})", label, pattern))
                .collect::<Vec<_>>()
                .join("|");
            match_regexes.push(
                Regex::new(&alternation)
                    .map_err(|e| TaxonomyError::new(format!("bad match_pattern chunk: {}", e)))?,
            );
        }

        let level_idx = self.levels.len();
        self.levels.push(Level {
            members,
            match_regexes,
        });
        Ok(level_idx)
    }
}

impl Classifier {
    /// Compile `taxonomy` into a `Classifier`. Fails (classifier-build-failure,
    /// on a missing/empty tag, a `_`-prefixed tag, or a
    /// duplicate tag anywhere in the tree.
    pub fn build(taxonomy: Taxonomy) -> Result<Classifier, TaxonomyError> {
        let mut builder = Builder {
            rules: Vec::new(),
            tag_to_index: HashMap::new(),
            group_labels_seen: HashMap::new(),
            levels: Vec::new(),
        };
        let root_level = builder.compile_level(taxonomy.roots, None, None, None, &[])?;
        Ok(Classifier {
            rules: builder.rules,
            tag_to_index: builder.tag_to_index,
            levels: builder.levels,
            root_level,
        })
    }

    pub fn start_pattern(&self, tag: &str) -> Option<&Regex> {
        self.tag_to_index.get(tag).map(|&i| &self.rules[i].start_re)
    }

    pub fn end_pattern(&self, tag: &str) -> Option<&Regex> {
        self.tag_to_index.get(tag).map(|&i| &self.rules[i].end_re)
    }

    pub fn max_lines(&self, tag: &str) -> Option<usize> {
        self.tag_to_index.get(tag).map(|&i| self.rules[i].max_lines)
    }

    /// Classify a single-line, whitespace-normalized comment and return the
    /// sorted, deduplicated list of externally-visible tags. `Ignore_`-
    /// prefixed tags participate in matching/refinement/cancels but never
    /// appear in the result.
    pub fn classify(&self, single_line_text: &str) -> Vec<String> {
        let tags = self.classify_level(self.root_level, single_line_text);
        let mut visible: Vec<String> = tags
            .into_iter()
            .filter(|t| !t.starts_with("Ignore_"))
            .collect();
        visible.sort();
        visible
    }

    fn classify_level(&self, level_idx: usize, text: &str) -> HashSet<String> {
        let level = &self.levels[level_idx];
        let mut tags: HashSet<String> = HashSet::new();

        for re in &level.match_regexes {
            for caps in re.captures_iter(text) {
                for (label, idx) in &level.members {
                    if caps.name(label).is_some() {
                        tags.insert(self.rules[*idx].tag.clone());
                    }
                }
            }
        }

        let mut refined = tags.clone();
        for tag in &tags {
            let idx = self.tag_to_index[tag];
            if let Some(child_level) = self.rules[idx].children_level {
                let child_tags = self.classify_level(child_level, text);
                if !child_tags.is_empty() {
                    refined.remove(tag);
                    refined.extend(child_tags);
                }
            }
        }

        let mut cancelled: HashSet<String> = HashSet::new();
        for tag in &refined {
            let idx = self.tag_to_index[tag];
            for c in &self.rules[idx].cancels {
                cancelled.insert(c.clone());
            }
        }
        for c in &cancelled {
            refined.remove(c);
        }

        refined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bsd_taxonomy() -> Taxonomy {
        Taxonomy::new(vec![LicenseRule::new(
            "BSD-2-Clause",
            r"Redistribution and use in source and",
        )
        .end(r"DAMAGE|PURPOSE")
        .subs(vec![LicenseRule::new(
            "BSD-3-Clause",
            r"Neither the name",
        )
        .subs(vec![LicenseRule::new("BSD-4-Clause", r"advertising materials")])])])
    }

    #[test]
    fn test_build_rejects_duplicate_tags() {
        let taxonomy = Taxonomy::new(vec![
            LicenseRule::new("MIT", "Permission is hereby granted"),
            LicenseRule::new("MIT", "something else"),
        ]);
        assert!(Classifier::build(taxonomy).is_err());
    }

    #[test]
    fn test_build_rejects_reserved_prefix() {
        let taxonomy = Taxonomy::new(vec![LicenseRule::new("_internal", "x")]);
        assert!(Classifier::build(taxonomy).is_err());
    }

    #[test]
    fn test_build_rejects_missing_tag() {
        let taxonomy = Taxonomy::new(vec![LicenseRule::new("", "x")]);
        assert!(Classifier::build(taxonomy).is_err());
    }

    #[test]
    fn test_classify_base_flavor_when_no_children_match() {
        let classifier = Classifier::build(bsd_taxonomy()).unwrap();
        let got = classifier.classify("Redistribution and use in source and binary forms DAMAGE");
        assert_eq!(got, vec!["BSD-2-Clause".to_string()]);
    }

    #[test]
    fn test_classify_refines_to_most_specific_child() {
        let classifier = Classifier::build(bsd_taxonomy()).unwrap();
        let got = classifier.classify(
            "Redistribution and use in source and binary forms Neither the name advertising materials DAMAGE",
        );
        assert_eq!(got, vec!["BSD-4-Clause".to_string()]);
    }

    #[test]
    fn test_classify_cancels_suppresses_tag() {
        let taxonomy = Taxonomy::new(vec![
            LicenseRule::new("A", "alpha").cancels(&["B"]),
            LicenseRule::new("B", "beta"),
        ]);
        let classifier = Classifier::build(taxonomy).unwrap();
        let got = classifier.classify("alpha beta");
        assert_eq!(got, vec!["A".to_string()]);
    }

    #[test]
    fn test_classify_hides_ignore_prefixed_tags() {
        let taxonomy = Taxonomy::new(vec![LicenseRule::new("Ignore_FalsePositive", "alpha")]);
        let classifier = Classifier::build(taxonomy).unwrap();
        assert!(classifier.classify("alpha").is_empty());
    }

    #[test]
    fn test_classify_no_match_returns_empty() {
        let classifier = Classifier::build(bsd_taxonomy()).unwrap();
        assert!(classifier.classify("nothing interesting here").is_empty());
    }

    #[test]
    fn test_cancels_inherited_by_refined_child() {
        let taxonomy = Taxonomy::new(vec![
            LicenseRule::new("Parent", "parent pattern")
                .cancels(&["Sibling"])
                .subs(vec![LicenseRule::new("Child", "child pattern")]),
            LicenseRule::new("Sibling", "sibling pattern"),
        ]);
        let classifier = Classifier::build(taxonomy).unwrap();
        let got = classifier.classify("parent pattern child pattern sibling pattern");
        assert_eq!(got, vec!["Child".to_string()]);
    }

    #[test]
    fn test_inherited_start_end_max_lines() {
        let taxonomy = Taxonomy::new(vec![LicenseRule::new("Parent", "parent pattern")
            .start("PARENT_START")
            .end("PARENT_END")
            .max_lines(12)
            .subs(vec![LicenseRule::new("Child", "child pattern")])]);
        let classifier = Classifier::build(taxonomy).unwrap();
        assert_eq!(classifier.max_lines("Child"), Some(12));
        assert!(classifier.start_pattern("Child").unwrap().is_match("PARENT_START"));
        assert!(classifier.end_pattern("Child").unwrap().is_match("PARENT_END"));
    }

    #[test]
    fn test_root_defaults_start_end_to_match_pattern() {
        let taxonomy = Taxonomy::new(vec![LicenseRule::new("Root", "root pattern")]);
        let classifier = Classifier::build(taxonomy).unwrap();
        assert!(classifier.start_pattern("Root").unwrap().is_match("root pattern"));
        assert!(classifier.end_pattern("Root").unwrap().is_match("root pattern"));
    }

    #[test]
    fn test_group_partitioning_across_many_rules() {
        let roots: Vec<LicenseRule> = (0..200)
            .map(|i| LicenseRule::new(&format!("Tag{}", i), &format!("pattern{}", i)))
            .collect();
        let classifier = Classifier::build(Taxonomy::new(roots)).unwrap();
        let got = classifier.classify("pattern150");
        assert_eq!(got, vec!["Tag150".to_string()]);
    }
}
