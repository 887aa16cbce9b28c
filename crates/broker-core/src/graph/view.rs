//! Structural views: one directed graph per edge filter over a shared
//! node index space.
//!
//! ## Pipeline
//!
//! ```text
//! EdgeRecord (source id, target id, category)
//!        ↓  resolve_edges(&registry, records)
//! Edge (source index, target index, category)
//!        ↓  build_view(node_count, &edges, predicate)
//! DirectedGraphStore
//! ```
//!
//! Views are rebuilt from the full edge list for every filter. Nothing is
//! filtered in place, so building one view can never disturb another.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{Endpoint, GraphError};
use crate::graph::store::DirectedGraphStore;
use crate::registry::IdentifierRegistry;
use crate::table::EdgeRecord;

/// Category of transport links removed by the reduced view.
pub const ROAD_CATEGORY: &str = "road";

/// An edge whose endpoints have been resolved through the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub category: String,
}

/// Resolve raw edge records to registry indices.
///
/// # Errors
///
/// Returns [`GraphError::UnknownIdentifier`] for the first record whose
/// source or target is not registered. No edge is dropped silently.
#[instrument(skip_all, fields(records = records.len()))]
pub fn resolve_edges(
    registry: &IdentifierRegistry,
    records: &[EdgeRecord],
) -> Result<Vec<Edge>, GraphError> {
    records
        .iter()
        .enumerate()
        .map(|(row, record)| -> Result<Edge, GraphError> {
            let lookup = |identifier: &str, endpoint: Endpoint| {
                registry
                    .index_of(identifier)
                    .map_err(|_| GraphError::UnknownIdentifier {
                        identifier: identifier.to_string(),
                        row,
                        endpoint,
                    })
            };
            Ok(Edge {
                source: lookup(&record.source, Endpoint::Source)?,
                target: lookup(&record.target, Endpoint::Target)?,
                category: record.category.clone(),
            })
        })
        .collect()
}

/// Edge inclusion rule for a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum EdgeFilter {
    /// Every edge.
    All,
    /// Every edge whose category differs from the given one.
    ExcludeCategory(String),
}

impl EdgeFilter {
    #[must_use]
    pub fn admits(&self, edge: &Edge) -> bool {
        match self {
            Self::All => true,
            Self::ExcludeCategory(category) => edge.category != *category,
        }
    }
}

/// Build the graph store holding the edges `predicate` admits.
///
/// # Errors
///
/// Returns [`GraphError::InvalidEdgeReference`] if an admitted edge points
/// outside `0..node_count`.
#[instrument(skip(edges, predicate), fields(edges = edges.len()))]
pub fn build_view(
    node_count: usize,
    edges: &[Edge],
    predicate: impl Fn(&Edge) -> bool,
) -> Result<DirectedGraphStore, GraphError> {
    let pairs: Vec<(usize, usize)> = edges
        .iter()
        .filter(|edge| predicate(edge))
        .map(|edge| (edge.source, edge.target))
        .collect();

    tracing::debug!(
        admitted = pairs.len(),
        excluded = edges.len() - pairs.len(),
        "view edges selected"
    );

    DirectedGraphStore::new(node_count, pairs)
}

/// A labelled structural view ready for centrality computation.
#[derive(Debug)]
pub struct GraphView {
    pub label: String,
    pub filter: EdgeFilter,
    pub store: DirectedGraphStore,
    /// Number of edges the filter rejected.
    pub excluded_edges: usize,
}

impl GraphView {
    /// Build the view selected by `filter`.
    ///
    /// # Errors
    ///
    /// See [`build_view`].
    pub fn build(
        label: impl Into<String>,
        filter: EdgeFilter,
        node_count: usize,
        edges: &[Edge],
    ) -> Result<Self, GraphError> {
        let store = build_view(node_count, edges, |edge| filter.admits(edge))?;
        let excluded_edges = edges.len() - store.edge_count();
        Ok(Self {
            label: label.into(),
            filter,
            store,
            excluded_edges,
        })
    }
}
