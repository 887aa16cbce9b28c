//! Normalized directed closeness centrality.
//!
//! # Definition
//!
//! For each node `v`, a breadth-first search collects `R(v)`, the nodes
//! reachable from `v` (never `v` itself), and their hop distances
//! `d(v, u)`. With `N` nodes in the graph:
//!
//! ```text
//! score(v) = 0                                       if |R(v)| = 0
//! score(v) = (|R(v)| / (N - 1)) * (|R(v)| / Σ d(v,u)) otherwise
//! ```
//!
//! The first factor is the fraction of the graph `v` can reach, the second
//! the inverse mean distance to what it reaches (Wasserman–Faust). Scores
//! lie in `[0, 1]`; a single-node graph scores `0`.
//!
//! # Direction
//!
//! | Mode  | Traversal                                   |
//! |-------|---------------------------------------------|
//! | `out` | forward edges: how fast `v` reaches others  |
//! | `in`  | reverse edges: how fast others reach `v`    |
//! | `all` | both, as if the graph were undirected       |
//!
//! # Complexity
//!
//! One BFS per node: `O(N * (N + E))` time, `O(N)` scratch per worker.
//! Parallel execution distributes sources over a rayon pool; each worker
//! owns its scratch buffer and results are collected in index order, so the
//! output is bit-identical to a sequential run.

use std::fmt;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::GraphError;
use crate::graph::store::{Adjacency, DirectedGraphStore};
use crate::metrics::result::CentralityResult;

/// Edge direction followed by the per-node searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Out,
    In,
    All,
}

impl Mode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Out => "out",
            Self::In => "in",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the per-node searches are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    Sequential,
    /// Rayon workers; `threads: None` uses the global pool.
    Parallel { threads: Option<usize> },
}

impl Default for Execution {
    fn default() -> Self {
        Self::Parallel { threads: None }
    }
}

/// Configuration for [`closeness_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClosenessConfig {
    pub mode: Mode,
    pub execution: Execution,
}

/// Compute closeness for every node on the calling thread.
#[must_use]
#[instrument(skip(store), fields(nodes = store.node_count(), edges = store.edge_count()))]
pub fn closeness_centrality(store: &DirectedGraphStore, mode: Mode) -> CentralityResult {
    let started = Instant::now();
    let traversal = Traversal::new(store, mode);
    let n = store.node_count();

    let mut scratch = BfsScratch::new(n);
    let scores = (0..n)
        .map(|source| traversal.closeness(source, &mut scratch))
        .collect();

    info!(
        %mode,
        elapsed_ms = started.elapsed().as_millis(),
        "closeness computed sequentially"
    );
    CentralityResult::new(scores)
}

/// Compute closeness for every node using the configured execution.
///
/// # Errors
///
/// Returns [`GraphError::ThreadPool`] if a dedicated worker pool was
/// requested and could not be built.
#[instrument(skip(store), fields(nodes = store.node_count(), edges = store.edge_count()))]
pub fn closeness_with(
    store: &DirectedGraphStore,
    config: &ClosenessConfig,
) -> Result<CentralityResult, GraphError> {
    let threads = match config.execution {
        Execution::Sequential => return Ok(closeness_centrality(store, config.mode)),
        Execution::Parallel { threads } => threads,
    };

    let started = Instant::now();
    let traversal = Traversal::new(store, config.mode);
    let n = store.node_count();

    let run = || -> Vec<f64> {
        (0..n)
            .into_par_iter()
            .map_init(
                || BfsScratch::new(n),
                |scratch, source| traversal.closeness(source, scratch),
            )
            .collect()
    };

    let scores = match threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(run),
        None => run(),
    };

    info!(
        mode = %config.mode,
        threads = threads.unwrap_or_else(rayon::current_num_threads),
        elapsed_ms = started.elapsed().as_millis(),
        "closeness computed in parallel"
    );
    Ok(CentralityResult::new(scores))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Neighbor lists followed by one mode.
struct Traversal<'a> {
    node_count: usize,
    primary: &'a Adjacency,
    secondary: Option<&'a Adjacency>,
}

impl<'a> Traversal<'a> {
    fn new(store: &'a DirectedGraphStore, mode: Mode) -> Self {
        let (primary, secondary) = match mode {
            Mode::Out => (store.forward(), None),
            Mode::In => (store.reverse(), None),
            Mode::All => (store.forward(), Some(store.reverse())),
        };
        Self {
            node_count: store.node_count(),
            primary,
            secondary,
        }
    }

    fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        let extra = self.secondary.map_or(&[][..], |adj| adj.neighbors(node));
        self.primary
            .neighbors(node)
            .iter()
            .chain(extra)
            .copied()
    }

    #[allow(clippy::cast_precision_loss)]
    fn closeness(&self, source: usize, scratch: &mut BfsScratch) -> f64 {
        if self.node_count < 2 {
            return 0.0;
        }

        scratch.reset();
        scratch.visit(source, 0);

        let mut head = 0;
        let mut total_distance: u64 = 0;
        while let Some(&node) = scratch.order.get(head) {
            head += 1;
            let next = scratch.dist[node] + 1;
            for neighbor in self.neighbors(node) {
                if scratch.dist[neighbor] == UNVISITED {
                    scratch.visit(neighbor, next);
                    total_distance += u64::from(next);
                }
            }
        }

        let reached = scratch.order.len() - 1;
        if reached == 0 {
            return 0.0;
        }

        let reached = reached as f64;
        let coverage = reached / (self.node_count - 1) as f64;
        let inverse_mean = reached / total_distance as f64;
        coverage * inverse_mean
    }
}

const UNVISITED: u32 = u32::MAX;

/// Per-worker BFS state. `order` doubles as the queue and as the list of
/// entries to clear before the next search.
struct BfsScratch {
    dist: Vec<u32>,
    order: Vec<usize>,
}

impl BfsScratch {
    fn new(node_count: usize) -> Self {
        Self {
            dist: vec![UNVISITED; node_count],
            order: Vec::with_capacity(node_count),
        }
    }

    fn reset(&mut self) {
        for &node in &self.order {
            self.dist[node] = UNVISITED;
        }
        self.order.clear();
    }

    fn visit(&mut self, node: usize, distance: u32) {
        self.dist[node] = distance;
        self.order.push(node);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
