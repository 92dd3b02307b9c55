use std::collections::{BTreeMap, BTreeSet};

use iamf_vectors::TestedSection;

/// Section → field → contributing test prefixes.
///
/// Prefixes are stored as a multiset; duplicates collapse only when a list is
/// read back through [`CoverageIndex::tests`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverageIndex {
    sections: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl CoverageIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `prefix` under the section and field of `tested`.
    pub fn record(&mut self, tested: TestedSection<'_>, prefix: &str) {
        self.sections
            .entry(tested.section.to_string())
            .or_default()
            .entry(tested.field.to_string())
            .or_default()
            .push(prefix.to_string());
    }

    /// True when the section was observed in any descriptor.
    pub fn contains_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Observed section identifiers, lexicographically ordered.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Observed fields of a section, lexicographically ordered.
    pub fn fields(&self, section: &str) -> Vec<&str> {
        self.sections
            .get(section)
            .map(|fields| fields.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Raw contributions at a path, in insertion order and with duplicates.
    pub fn contributions(&self, section: &str, field: &str) -> &[String] {
        self.sections
            .get(section)
            .and_then(|fields| fields.get(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Deduplicated, sorted tests at a path; empty when the path is unobserved.
    pub fn tests(&self, section: &str, field: &str) -> Vec<String> {
        self.contributions(section, field)
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of observed sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
