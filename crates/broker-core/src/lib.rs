#![forbid(unsafe_code)]
//! broker-core library.
//!
//! Directed closeness "power broker" scores for entity-link graphs, computed
//! over several structural views of one node table.
//!
//! # Conventions
//!
//! - **Errors**: Engine operations return [`error::GraphError`]; glue code
//!   (config loading) uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod assemble;
pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod pipeline;
pub mod registry;
pub mod table;

pub use error::{ErrorCode, GraphError};
pub use pipeline::{ScoringPlan, ScoringReport};
