use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Writer, WriterBuilder};
use iamf_core::errors::{ErrorInfo, SuiteError};
use serde::{Deserialize, Serialize};

use crate::index::CoverageIndex;
use crate::sections::sort_sections;
use crate::summary::{render_list, SummaryTable};

/// File name of the per-test summary table.
pub const SUMMARY_FILE: &str = "test_summary.csv";
/// File name of the per-section coverage table.
pub const COVERAGE_FILE: &str = "coverage.csv";

const SUMMARY_HEADER: [&str; 6] = [
    "test",
    "base",
    "primary_tested_spec_sections",
    "is_valid",
    "is_valid_to_decode",
    "description",
];
const COVERAGE_HEADER: [&str; 3] = [
    "primary_tested_spec_section",
    "primary_tested_spec_section_field",
    "tests",
];

fn report_error(code: &str, path: &Path, err: impl ToString) -> SuiteError {
    SuiteError::Report(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// One line of `coverage.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRow {
    /// Canonical section identifier.
    pub section: String,
    /// Field within the section, empty for whole-section coverage.
    pub field: String,
    /// Sorted, deduplicated contributing tests.
    pub tests: Vec<String>,
}

impl CoverageRow {
    /// The `tests` cell as written to the table.
    pub fn rendered_tests(&self) -> String {
        render_list(&self.tests)
    }
}

/// Expands the canonical list into coverage rows.
///
/// Sections are visited in dotted-numeric order. An unobserved section yields
/// a single row with an empty field and no tests; an observed one yields one
/// row per field. Observed sections missing from `canonical` produce no rows.
pub fn coverage_rows<S: AsRef<str>>(
    index: &CoverageIndex,
    canonical: &[S],
) -> Result<Vec<CoverageRow>, SuiteError> {
    let mut rows = Vec::new();
    for section in sort_sections(canonical)? {
        if !index.contains_section(&section) {
            rows.push(CoverageRow {
                section,
                field: String::new(),
                tests: Vec::new(),
            });
            continue;
        }
        for field in index.fields(&section) {
            rows.push(CoverageRow {
                section: section.clone(),
                field: field.to_string(),
                tests: index.tests(&section, field),
            });
        }
    }
    Ok(rows)
}

fn bool_cell(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn quoted_writer<W: io::Write>(sink: W) -> Writer<W> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(sink)
}

/// Writes the summary table, every field quoted.
pub fn write_summary<W: io::Write>(sink: W, summary: &SummaryTable) -> csv::Result<()> {
    let mut wtr = quoted_writer(sink);
    wtr.write_record(SUMMARY_HEADER)?;
    for row in summary.rows() {
        wtr.write_record([
            row.test.as_str(),
            row.base.as_str(),
            row.primary_tested_spec_sections.as_str(),
            bool_cell(row.is_valid),
            bool_cell(row.is_valid_to_decode),
            row.description.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the coverage table, every field quoted.
pub fn write_coverage<W: io::Write>(sink: W, rows: &[CoverageRow]) -> csv::Result<()> {
    let mut wtr = quoted_writer(sink);
    wtr.write_record(COVERAGE_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.section.as_str(),
            row.field.as_str(),
            row.rendered_tests().as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Paths of the tables written by [`write_reports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// `test_summary.csv`.
    pub summary: PathBuf,
    /// `coverage.csv`.
    pub coverage: PathBuf,
}

/// Writes both tables into `out_dir`, creating it when absent.
pub fn write_reports(
    out_dir: &Path,
    summary: &SummaryTable,
    rows: &[CoverageRow],
) -> Result<ReportPaths, SuiteError> {
    fs::create_dir_all(out_dir)
        .map_err(|err| report_error("iamf_coverage.out_dir", out_dir, err))?;
    let paths = ReportPaths {
        summary: out_dir.join(SUMMARY_FILE),
        coverage: out_dir.join(COVERAGE_FILE),
    };
    let file = fs::File::create(&paths.summary)
        .map_err(|err| report_error("iamf_coverage.csv_create", &paths.summary, err))?;
    write_summary(file, summary)
        .map_err(|err| report_error("iamf_coverage.csv_write", &paths.summary, err))?;
    let file = fs::File::create(&paths.coverage)
        .map_err(|err| report_error("iamf_coverage.csv_create", &paths.coverage, err))?;
    write_coverage(file, rows)
        .map_err(|err| report_error("iamf_coverage.csv_write", &paths.coverage, err))?;
    Ok(paths)
}
