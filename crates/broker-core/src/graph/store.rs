//! Immutable directed adjacency over a fixed node index space.
//!
//! # Layout
//!
//! Edges live in one flat arena grouped by source index:
//!
//! ```text
//! offsets: [0, 2, 2, 3]        (node_count + 1 entries)
//! targets: [1, 2, 0]           (one entry per edge)
//!
//! neighbors(0) = targets[0..2] = [1, 2]
//! neighbors(1) = targets[2..2] = []
//! neighbors(2) = targets[2..3] = [0]
//! ```
//!
//! Within one source, neighbors keep edge insertion order. Parallel edges
//! and self-loops are retained as given; traversals mark visited nodes, so
//! a repeated neighbor never adds reachability or distance.
//!
//! The reverse adjacency has the same layout with every edge flipped. It is
//! derived on first use and cached for the life of the store.

use std::sync::OnceLock;

use tracing::instrument;

use crate::error::GraphError;

/// One direction of adjacency in compressed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl Adjacency {
    /// Group `pairs` by their first element, preserving input order.
    ///
    /// Callers must have range-checked every index against `node_count`.
    fn from_pairs(node_count: usize, pairs: impl Iterator<Item = (usize, usize)> + Clone) -> Self {
        let mut offsets = vec![0_usize; node_count + 1];
        for (from, _) in pairs.clone() {
            offsets[from + 1] += 1;
        }
        for i in 0..node_count {
            offsets[i + 1] += offsets[i];
        }

        let mut cursor = offsets.clone();
        let mut targets = vec![0_usize; offsets[node_count]];
        for (from, to) in pairs {
            targets[cursor[from]] = to;
            cursor[from] += 1;
        }

        Self { offsets, targets }
    }

    /// Neighbors of `node` in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is outside the store's node range.
    #[must_use]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }

    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }
}

/// A directed graph over `node_count` registry indices.
///
/// Built once per structural view and never mutated afterwards.
#[derive(Debug)]
pub struct DirectedGraphStore {
    node_count: usize,
    edges: Vec<(usize, usize)>,
    forward: Adjacency,
    reverse: OnceLock<Adjacency>,
}

impl DirectedGraphStore {
    /// Build a store from resolved `(source, target)` index pairs.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidEdgeReference`] if any index is not in
    /// `0..node_count`.
    #[instrument(skip(edges), fields(edges = edges.len()))]
    pub fn new(node_count: usize, edges: Vec<(usize, usize)>) -> Result<Self, GraphError> {
        for (edge, &(source, target)) in edges.iter().enumerate() {
            for index in [source, target] {
                if index >= node_count {
                    return Err(GraphError::InvalidEdgeReference {
                        edge,
                        index,
                        node_count,
                    });
                }
            }
        }

        let forward = Adjacency::from_pairs(node_count, edges.iter().copied());

        Ok(Self {
            node_count,
            edges,
            forward,
            reverse: OnceLock::new(),
        })
    }

    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The validated edge list in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Outgoing adjacency.
    #[must_use]
    pub const fn forward(&self) -> &Adjacency {
        &self.forward
    }

    /// Incoming adjacency, built on first call.
    pub fn reverse(&self) -> &Adjacency {
        self.reverse.get_or_init(|| {
            tracing::debug!(nodes = self.node_count, "building reverse adjacency");
            Adjacency::from_pairs(
                self.node_count,
                self.edges.iter().map(|&(source, target)| (target, source)),
            )
        })
    }

    /// Whether the reverse adjacency has been materialized yet.
    #[must_use]
    pub fn has_reverse(&self) -> bool {
        self.reverse.get().is_some()
    }
}
