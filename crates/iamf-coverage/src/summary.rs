use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use iamf_vectors::TestVectorDescriptor;

/// Separator used when a list is rendered into a single cell.
pub const LIST_SEPARATOR: &str = ", ";

/// Renders a list as plain text, without brackets or quotes.
pub fn render_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<&str>>()
        .join(LIST_SEPARATOR)
}

/// Inverse of [`render_list`]; an empty cell yields no items.
///
/// The round trip holds only for lists of non-empty items: `[""]` renders to
/// an empty cell and comes back as `[]`.
pub fn split_list(cell: &str) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    cell.split(LIST_SEPARATOR).map(str::to_string).collect()
}

/// One line of `test_summary.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// `file_name_prefix` of the descriptor.
    pub test: String,
    /// `base_test` of the descriptor.
    pub base: String,
    /// Rendered `primary_tested_spec_sections`.
    pub primary_tested_spec_sections: String,
    /// Whether the vector is encoded.
    pub is_valid: bool,
    /// Whether the vector should decode.
    pub is_valid_to_decode: bool,
    /// Free-text description.
    pub description: String,
}

impl SummaryRow {
    /// Captures the reported fields of a descriptor.
    pub fn from_descriptor(descriptor: &TestVectorDescriptor) -> Self {
        let vector = descriptor.vector();
        Self {
            test: vector.file_name_prefix.clone(),
            base: vector.base_test.clone(),
            primary_tested_spec_sections: render_list(&vector.primary_tested_spec_sections),
            is_valid: vector.is_valid,
            is_valid_to_decode: vector.is_valid_to_decode,
            description: vector.human_readable_description.clone(),
        }
    }
}

/// Summary rows keyed by test prefix, in first-seen order.
///
/// Inserting an existing prefix replaces the row in place, so the later
/// descriptor wins while the row keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryTable {
    rows: IndexMap<String, SummaryRow>,
}

impl SummaryTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the row for the row's prefix; returns the replaced row.
    pub fn upsert(&mut self, row: SummaryRow) -> Option<SummaryRow> {
        self.rows.insert(row.test.clone(), row)
    }

    /// Looks a row up by prefix.
    pub fn get(&self, test: &str) -> Option<&SummaryRow> {
        self.rows.get(test)
    }

    /// Rows in emission order.
    pub fn rows(&self) -> impl Iterator<Item = &SummaryRow> {
        self.rows.values()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
