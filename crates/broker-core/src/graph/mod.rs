//! Directed graph construction for centrality scoring.
//!
//! # Overview
//!
//! Every structural view shares the node index space of one
//! [`IdentifierRegistry`](crate::registry::IdentifierRegistry) and owns an
//! independent, immutable [`DirectedGraphStore`].
//!
//! ## Pipeline
//!
//! ```text
//! node table ──► IdentifierRegistry
//! edge table ──► resolve_edges() ──► Vec<Edge>
//!                                      │
//!              ┌───────────────────────┴──────────────────────┐
//!              ▼                                              ▼
//!   GraphView "all edges"                      GraphView "no road edges"
//!   (EdgeFilter::All)                          (EdgeFilter::ExcludeCategory)
//!              │                                              │
//!              ▼                                              ▼
//!        ViewStats                                      ViewStats
//! ```

pub mod stats;
pub mod store;
pub mod view;

pub use stats::ViewStats;
pub use store::{Adjacency, DirectedGraphStore};
pub use view::{Edge, EdgeFilter, GraphView, ROAD_CATEGORY, build_view, resolve_edges};
