//! Score assembly: merge labelled centrality vectors back onto node rows.
//!
//! Output rows follow the node table's row order exactly; downstream
//! consumers correlate on row position plus identifier. Each score column
//! is appended after the node columns, unless its label already names a
//! node column, in which case the scores replace that column in place.

use serde::Serialize;
use tracing::instrument;

use crate::error::GraphError;
use crate::metrics::result::CentralityResult;
use crate::registry::IdentifierRegistry;
use crate::table::NodeTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Attribute(usize),
    Score(usize),
}

/// One output row: the node's original fields and its scores in label order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRow {
    pub identifier: String,
    pub attributes: Vec<String>,
    pub scores: Vec<f64>,
}

/// Node table extended with one column per centrality result.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    headers: Vec<String>,
    labels: Vec<String>,
    layout: Vec<Column>,
    rows: Vec<ScoredRow>,
}

impl ScoreTable {
    /// Output header, node columns first.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Score column labels in the order results were supplied.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn rows(&self) -> &[ScoredRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Scores under `label`, in row order.
    #[must_use]
    pub fn column(&self, label: &str) -> Option<Vec<f64>> {
        let position = self.labels.iter().position(|l| l == label)?;
        Some(self.rows.iter().map(|row| row.scores[position]).collect())
    }

    /// Rows rendered as output fields, aligned with [`headers`](Self::headers).
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().map(|row| {
            self.layout
                .iter()
                .map(|column| match *column {
                    Column::Attribute(i) => row.attributes[i].clone(),
                    Column::Score(j) => format_score(row.scores[j]),
                })
                .collect()
        })
    }
}

/// Shortest round-trip rendering, always with a fractional part (`1.0`).
#[must_use]
pub fn format_score(score: f64) -> String {
    format!("{score:?}")
}

/// Merge `results` onto the rows of `nodes`.
///
/// # Errors
///
/// - [`GraphError::MisalignedResult`] if a result's length differs from
///   the registry's node count.
/// - [`GraphError::DuplicateLabel`] if two results share a label.
/// - [`GraphError::UnregisteredIdentifier`] if a node row is missing from
///   the registry (the registry was built from a different table).
#[instrument(skip_all, fields(rows = nodes.len(), results = results.len()))]
pub fn assemble(
    nodes: &NodeTable,
    registry: &IdentifierRegistry,
    results: &[(&str, &CentralityResult)],
) -> Result<ScoreTable, GraphError> {
    let mut labels: Vec<String> = Vec::with_capacity(results.len());
    for &(label, result) in results {
        if result.len() != registry.len() {
            return Err(GraphError::MisalignedResult {
                label: label.to_string(),
                expected: registry.len(),
                actual: result.len(),
            });
        }
        if labels.iter().any(|l| l == label) {
            return Err(GraphError::DuplicateLabel(label.to_string()));
        }
        labels.push(label.to_string());
    }

    let width = nodes.headers().len() + labels.len();
    let mut headers: Vec<String> = Vec::with_capacity(width);
    let mut layout = Vec::with_capacity(width);
    for (i, header) in nodes.headers().iter().enumerate() {
        headers.push(header.clone());
        layout.push(
            labels
                .iter()
                .position(|label| label == header)
                .map_or(Column::Attribute(i), Column::Score),
        );
    }
    for (j, label) in labels.iter().enumerate() {
        if !nodes.headers().contains(label) {
            headers.push(label.clone());
            layout.push(Column::Score(j));
        }
    }

    let rows = nodes
        .rows()
        .iter()
        .zip(nodes.identifiers())
        .map(|(fields, identifier)| -> Result<ScoredRow, GraphError> {
            let index = registry.index_of(identifier)?;
            Ok(ScoredRow {
                identifier: identifier.to_string(),
                attributes: fields.clone(),
                scores: results
                    .iter()
                    .map(|(_, result)| result.scores()[index])
                    .collect(),
            })
        })
        .collect::<Result<Vec<_>, GraphError>>()?;

    tracing::debug!(columns = headers.len(), "score table assembled");

    Ok(ScoreTable {
        headers,
        labels,
        layout,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| (*f).to_string()).collect()
    }

    fn nodes() -> NodeTable {
        NodeTable::from_rows(
            strings(&["id", "label"]),
            vec![
                strings(&["b", "Brundisium"]),
                strings(&["a", "Aquileia"]),
                strings(&["c", "Carthago"]),
            ],
            "id",
        )
        .unwrap()
    }

    #[test]
    fn appends_columns_in_row_order() {
        let nodes = nodes();
        let registry = IdentifierRegistry::from_identifiers(nodes.identifiers()).unwrap();
        let all = CentralityResult::new(vec![1.0, 0.5, 0.0]);
        let reduced = CentralityResult::new(vec![0.25, 0.0, 0.0]);

        let table = assemble(&nodes, &registry, &[("all", &all), ("reduced", &reduced)]).unwrap();

        assert_eq!(table.headers(), strings(&["id", "label", "all", "reduced"]));
        let records: Vec<Vec<String>> = table.records().collect();
        assert_eq!(records[0], strings(&["b", "Brundisium", "1.0", "0.25"]));
        assert_eq!(records[1], strings(&["a", "Aquileia", "0.5", "0.0"]));
        assert_eq!(records[2], strings(&["c", "Carthago", "0.0", "0.0"]));
        assert_eq!(table.column("all"), Some(vec![1.0, 0.5, 0.0]));
    }

    #[test]
    fn misaligned_result_is_rejected() {
        let nodes = nodes();
        let registry = IdentifierRegistry::from_identifiers(nodes.identifiers()).unwrap();
        let short = CentralityResult::new(vec![1.0]);
        let err = assemble(&nodes, &registry, &[("all", &short)]).unwrap_err();
        assert_eq!(
            err,
            GraphError::MisalignedResult {
                label: "all".to_string(),
                expected: 3,
                actual: 1,
            }
        );
    }

    #[test]
    fn duplicate_label_is_rejected() {
        let nodes = nodes();
        let registry = IdentifierRegistry::from_identifiers(nodes.identifiers()).unwrap();
        let r = CentralityResult::new(vec![0.0; 3]);
        let err = assemble(&nodes, &registry, &[("x", &r), ("x", &r)]).unwrap_err();
        assert_eq!(err, GraphError::DuplicateLabel("x".to_string()));
    }

    #[test]
    fn existing_column_is_overwritten_in_place() {
        let nodes = nodes();
        let registry = IdentifierRegistry::from_identifiers(nodes.identifiers()).unwrap();
        let r = CentralityResult::new(vec![0.1, 0.2, 0.3]);
        let table = assemble(&nodes, &registry, &[("label", &r)]).unwrap();
        assert_eq!(table.headers(), strings(&["id", "label"]));
        let first: Vec<String> = table.records().next().unwrap();
        assert_eq!(first, strings(&["b", "0.1"]));
    }

    #[test]
    fn registry_from_other_table_is_detected() {
        let nodes = nodes();
        let registry = IdentifierRegistry::from_identifiers(["a", "b", "z"]).unwrap();
        let r = CentralityResult::new(vec![0.0; 3]);
        let err = assemble(&nodes, &registry, &[("all", &r)]).unwrap_err();
        assert_eq!(err, GraphError::UnregisteredIdentifier("c".to_string()));
    }

    #[test]
    fn format_keeps_fraction() {
        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(2.0 / 3.0), "0.6666666666666666");
    }
}
