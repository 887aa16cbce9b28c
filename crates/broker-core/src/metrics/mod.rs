//! Centrality metrics over a [`DirectedGraphStore`](crate::graph::DirectedGraphStore).
//!
//! Every metric returns a [`CentralityResult`]: one score per registry
//! index, in index order, ready for the score assembler.
//!
//! ```rust,ignore
//! use broker_core::metrics::closeness::{closeness_centrality, Mode};
//!
//! let scores = closeness_centrality(&view.store, Mode::Out);
//! assert_eq!(scores.len(), registry.len());
//! ```

pub mod closeness;
pub mod result;

pub use closeness::{ClosenessConfig, Execution, Mode, closeness_centrality, closeness_with};
pub use result::{CentralityResult, ScoreSummary};
