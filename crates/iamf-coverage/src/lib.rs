#![deny(missing_docs)]
#![doc = "Specification coverage index and summary reports for IAMF test vectors."]

use iamf_core::errors::SuiteError;
use iamf_vectors::{select_by_tag, TestVectorDescriptor};
use tracing::{info, warn};

/// Section → field → tests index.
pub mod index;
/// Coverage rows and CSV emission.
pub mod report;
/// Canonical section list and dotted-numeric ordering.
pub mod sections;
/// Per-test summary table.
pub mod summary;

pub use index::CoverageIndex;
pub use report::{
    coverage_rows, write_coverage, write_reports, write_summary, CoverageRow, ReportPaths,
    COVERAGE_FILE, SUMMARY_FILE,
};
pub use sections::{
    compare_sections, default_sections, sort_sections, SectionKey, SPEC_SECTIONS,
};
pub use summary::{render_list, split_list, SummaryRow, SummaryTable, LIST_SEPARATOR};

/// Everything derived from one pass over the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverageReport {
    /// Per-test rows in discovery order.
    pub summary: SummaryTable,
    /// Raw coverage index over the selected descriptors.
    pub index: CoverageIndex,
    /// Rows of the coverage table, canonical order.
    pub coverage: Vec<CoverageRow>,
    /// Observed sections absent from the canonical list, left out of `coverage`.
    pub uncanonical_sections: Vec<String>,
}

/// Builds the summary table and coverage rows for the descriptors carrying
/// `repository_tag` (all descriptors when the tag is empty).
pub fn build<I, S>(
    descriptors: I,
    repository_tag: &str,
    canonical: &[S],
) -> Result<CoverageReport, SuiteError>
where
    I: IntoIterator<Item = TestVectorDescriptor>,
    S: AsRef<str>,
{
    let selected = select_by_tag(descriptors, repository_tag);
    let mut summary = SummaryTable::new();
    let mut index = CoverageIndex::new();
    for descriptor in &selected {
        if descriptor.prefix().is_empty() {
            warn!(
                target: "iamf_coverage",
                source = %descriptor.source().display(),
                "descriptor has an empty file_name_prefix"
            );
        }
        if let Some(previous) = summary.upsert(SummaryRow::from_descriptor(descriptor)) {
            warn!(
                target: "iamf_coverage",
                test = %previous.test,
                source = %descriptor.source().display(),
                "duplicate file_name_prefix, keeping the later descriptor"
            );
        }
        for tested in descriptor.vector().tested_sections() {
            index.record(tested, descriptor.prefix());
        }
    }

    let coverage = coverage_rows(&index, canonical)?;
    let uncanonical_sections: Vec<String> = index
        .sections()
        .filter(|section| !canonical.iter().any(|known| known.as_ref() == *section))
        .map(str::to_string)
        .collect();
    for section in &uncanonical_sections {
        warn!(
            target: "iamf_coverage",
            section = %section,
            "section is not in the canonical list; omitted from coverage"
        );
    }
    info!(
        target: "iamf_coverage",
        selected = selected.len(),
        tests = summary.len(),
        rows = coverage.len(),
        "coverage built"
    );
    Ok(CoverageReport {
        summary,
        index,
        coverage,
        uncanonical_sections,
    })
}
