//! CSV loading and writing for node, edge and score tables.
//!
//! Fields are read as strings and passed through untouched; identifiers are
//! matched verbatim. Row width checks are left to `broker-core` so they
//! surface with an error code.

use std::path::Path;

use anyhow::{Context, Result};
use broker_core::assemble::ScoreTable;
use broker_core::table::{ColumnNames, EdgeRecord, NodeTable, edge_records};

/// Read a headered CSV into its header and data rows.
fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect::<Vec<String>>()))
        .collect::<Result<Vec<Vec<String>>, _>>()
        .with_context(|| format!("Failed to read rows of {}", path.display()))?;

    Ok((headers, rows))
}

/// Load the node table from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or lacks the id column.
pub fn read_node_table(path: &Path, columns: &ColumnNames) -> Result<NodeTable> {
    let (headers, rows) = read_csv(path)?;
    let table = NodeTable::from_rows(headers, rows, &columns.id)
        .with_context(|| format!("Invalid node table {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = table.len(), "node table loaded");
    Ok(table)
}

/// Load edge records from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or lacks a required column.
pub fn read_edge_records(path: &Path, columns: &ColumnNames) -> Result<Vec<EdgeRecord>> {
    let (headers, rows) = read_csv(path)?;
    let records = edge_records(&headers, &rows, columns)
        .with_context(|| format!("Invalid edge table {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = records.len(), "edge table loaded");
    Ok(records)
}

/// Write the score table as CSV, header first.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_score_table(path: &Path, table: &ScoreTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer
        .write_record(table.headers())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    for record in table.records() {
        writer
            .write_record(&record)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    tracing::info!(path = %path.display(), rows = table.len(), "score table written");
    Ok(())
}
