//! In-memory node and edge tables.
//!
//! Tables hold raw string fields exactly as read. Identifiers are compared
//! verbatim; no trimming or numeric coercion happens here. Rows are
//! numbered from zero in data order (the header is not a row).

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Header names of the columns the engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_category")]
    pub category: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: default_id(),
            source: default_source(),
            target: default_target(),
            category: default_category(),
        }
    }
}

fn default_id() -> String {
    "id".to_string()
}

fn default_source() -> String {
    "source".to_string()
}

fn default_target() -> String {
    "target".to_string()
}

fn default_category() -> String {
    "type".to_string()
}

/// The node table: identifier column plus passthrough attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    id_column: usize,
}

impl NodeTable {
    /// Build a node table, locating the identifier column by name.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingColumn`] if `id_column` is not in
    /// `headers`, or [`GraphError::RaggedRow`] if a row's width differs
    /// from the header's.
    pub fn from_rows(
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        id_column: &str,
    ) -> Result<Self, GraphError> {
        let id_column = column_position("node", &headers, id_column)?;
        check_widths("node", headers.len(), &rows)?;
        Ok(Self {
            headers,
            rows,
            id_column,
        })
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Identifier of every row, in row order.
    pub fn identifiers(&self) -> impl ExactSizeIterator<Item = &str> {
        self.rows.iter().map(|row| row[self.id_column].as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One edge row, before identifier resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    /// Relationship category; empty when the field is blank.
    pub category: String,
}

impl EdgeRecord {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            category: category.into(),
        }
    }
}

/// Extract edge records from a headered edge table.
///
/// # Errors
///
/// Returns [`GraphError::MissingColumn`] if the source, target or category
/// column is absent, or [`GraphError::RaggedRow`] for a malformed row.
pub fn edge_records(
    headers: &[String],
    rows: &[Vec<String>],
    columns: &ColumnNames,
) -> Result<Vec<EdgeRecord>, GraphError> {
    let source = column_position("edge", headers, &columns.source)?;
    let target = column_position("edge", headers, &columns.target)?;
    let category = column_position("edge", headers, &columns.category)?;
    check_widths("edge", headers.len(), rows)?;

    Ok(rows
        .iter()
        .map(|row| EdgeRecord {
            source: row[source].clone(),
            target: row[target].clone(),
            category: row[category].clone(),
        })
        .collect())
}

fn column_position(
    table: &'static str,
    headers: &[String],
    column: &str,
) -> Result<usize, GraphError> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| GraphError::MissingColumn {
            table,
            column: column.to_string(),
        })
}

fn check_widths(
    table: &'static str,
    expected: usize,
    rows: &[Vec<String>],
) -> Result<(), GraphError> {
    match rows.iter().position(|row| row.len() != expected) {
        Some(row) => Err(GraphError::RaggedRow {
            table,
            row,
            expected,
            actual: rows[row].len(),
        }),
        None => Ok(()),
    }
}
