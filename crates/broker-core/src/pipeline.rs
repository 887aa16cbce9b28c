//! End-to-end scoring: tables in, score table out.
//!
//! ```text
//! NodeTable ──► IdentifierRegistry ─┐
//! EdgeRecords ──► resolve_edges() ──┼──► GraphView × views ──► closeness × views
//!                                   │                                 │
//!                                   └──────────► assemble() ◄─────────┘
//! ```
//!
//! Views are independent, so with parallel execution they are built and
//! scored concurrently. Results are gathered in plan order either way.

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument};

use crate::assemble::{ScoreTable, assemble};
use crate::config::BrokerConfig;
use crate::error::GraphError;
use crate::graph::stats::ViewStats;
use crate::graph::view::{Edge, EdgeFilter, GraphView, resolve_edges};
use crate::metrics::closeness::{ClosenessConfig, Execution, Mode, closeness_with};
use crate::metrics::result::{CentralityResult, ScoreSummary};
use crate::registry::IdentifierRegistry;
use crate::table::{EdgeRecord, NodeTable};

/// A view to build and the output column its scores go to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSpec {
    pub label: String,
    pub filter: EdgeFilter,
}

impl ViewSpec {
    pub fn new(label: impl Into<String>, filter: EdgeFilter) -> Self {
        Self {
            label: label.into(),
            filter,
        }
    }
}

/// Which views to score, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringPlan {
    pub views: Vec<ViewSpec>,
    pub closeness: ClosenessConfig,
}

/// Per-view diagnostics gathered during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewReport {
    pub filter: EdgeFilter,
    pub stats: ViewStats,
    pub scores: ScoreSummary,
}

/// Output of [`ScoringPlan::run`].
#[derive(Debug, Clone)]
pub struct ScoringReport {
    pub mode: Mode,
    pub table: ScoreTable,
    pub views: Vec<ViewReport>,
}

impl ScoringPlan {
    /// The two power-broker views: all edges, and all edges except
    /// `config.exclude_category`.
    #[must_use]
    pub fn power_broker(config: &BrokerConfig) -> Self {
        Self {
            views: vec![
                ViewSpec::new(config.labels.all_edges.clone(), EdgeFilter::All),
                ViewSpec::new(
                    config.reduced_label(),
                    EdgeFilter::ExcludeCategory(config.exclude_category.clone()),
                ),
            ],
            closeness: ClosenessConfig {
                mode: config.mode,
                execution: config.execution(),
            },
        }
    }

    /// Score every view and assemble the output table.
    ///
    /// # Errors
    ///
    /// Fails on the first [`GraphError`]: duplicate node identifiers,
    /// unresolved edge endpoints, worker pool failure, or a label clash
    /// during assembly.
    #[instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len(), mode = %self.closeness.mode))]
    pub fn run(
        &self,
        nodes: &NodeTable,
        edges: &[EdgeRecord],
    ) -> Result<ScoringReport, GraphError> {
        let started = Instant::now();

        let registry = IdentifierRegistry::from_identifiers(nodes.identifiers())?;
        let edges = resolve_edges(&registry, edges)?;

        let scored: Vec<(GraphView, CentralityResult)> = match self.closeness.execution {
            Execution::Sequential => self
                .views
                .iter()
                .map(|spec| self.score_view(spec, registry.len(), &edges))
                .collect::<Result<_, _>>()?,
            Execution::Parallel { .. } => self
                .views
                .par_iter()
                .map(|spec| self.score_view(spec, registry.len(), &edges))
                .collect::<Result<_, _>>()?,
        };

        let columns: Vec<(&str, &CentralityResult)> = scored
            .iter()
            .map(|(view, result)| (view.label.as_str(), result))
            .collect();
        let table = assemble(nodes, &registry, &columns)?;

        let views = scored
            .iter()
            .map(|(view, result)| ViewReport {
                filter: view.filter.clone(),
                stats: ViewStats::from_view(view),
                scores: result.summary(),
            })
            .collect();

        info!(
            views = self.views.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "scoring run complete"
        );

        Ok(ScoringReport {
            mode: self.closeness.mode,
            table,
            views,
        })
    }

    fn score_view(
        &self,
        spec: &ViewSpec,
        node_count: usize,
        edges: &[Edge],
    ) -> Result<(GraphView, CentralityResult), GraphError> {
        let view = GraphView::build(spec.label.clone(), spec.filter.clone(), node_count, edges)?;
        info!(
            label = %view.label,
            edges = view.store.edge_count(),
            excluded = view.excluded_edges,
            "view built"
        );
        let result = closeness_with(&view.store, &self.closeness)?;
        Ok((view, result))
    }
}
