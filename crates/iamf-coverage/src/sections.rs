use std::cmp::Ordering;

use iamf_core::errors::{ErrorInfo, SuiteError};

/// Every section of the IAMF specification the coverage table accounts for.
pub const SPEC_SECTIONS: &[&str] = &[
    "3.1", "3.2", "3.3", "3.4", "3.5", "3.6", "3.6.1", "3.6.2", "3.6.2.1", "3.6.3", "3.7",
    "3.7.1", "3.7.2", "3.7.3", "3.7.4", "3.7.5", "3.7.6", "3.7.7", "3.8", "3.8.1", "3.8.2",
    "3.8.3", "3.9", "3.10", "3.11.1", "3.11.2", "3.11.3", "3.11.4", "4.1", "4.2", "5.1", "5.1.1",
    "5.1.2", "6.1", "6.2.1", "6.2.2", "6.2.3", "6.2.4", "7", "7.1", "7.2", "7.2.1", "7.2.2",
    "7.2.3", "7.3", "7.3.1", "7.3.2.1", "7.3.2.2", "7.3.2.3", "7.3.2.4", "7.3.3", "7.4", "7.5.1",
    "7.5.2", "7.6.1", "7.6.2", "9.1.2.1", "9.1.2.2", "9.1.2.3", "9.1.2.4",
];

/// Numeric sort key of a dotted section identifier.
///
/// Each component must fit in a `u64`; larger components are rejected like
/// any other non-numeric id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionKey(Vec<u64>);

impl SectionKey {
    /// Parses `"3.6.2"` into `[3, 6, 2]`.
    pub fn parse(section: &str) -> Result<Self, SuiteError> {
        section
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map(SectionKey)
            .map_err(|err| {
                SuiteError::Config(
                    ErrorInfo::new("iamf_coverage.section_id", err.to_string())
                        .with_context("section", section.to_string())
                        .with_hint("section identifiers are dot separated integers"),
                )
            })
    }

    /// The parsed components.
    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

/// Compares two section identifiers component-wise as integers.
pub fn compare_sections(a: &str, b: &str) -> Result<Ordering, SuiteError> {
    Ok(SectionKey::parse(a)?.cmp(&SectionKey::parse(b)?))
}

/// Returns the identifiers in dotted-numeric order (`3.9` before `3.10`).
pub fn sort_sections<S: AsRef<str>>(sections: &[S]) -> Result<Vec<String>, SuiteError> {
    let mut keyed = sections
        .iter()
        .map(|section| {
            let section = section.as_ref();
            SectionKey::parse(section).map(|key| (key, section.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, section)| section).collect())
}

/// The built-in section list as owned strings.
pub fn default_sections() -> Vec<String> {
    SPEC_SECTIONS.iter().map(|section| section.to_string()).collect()
}
