//! `power-broker stats`: shape of each scored view without writing output.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use broker_core::ScoringPlan;
use broker_core::pipeline::ViewReport;
use clap::Args;
use serde::Serialize;

use super::{GraphArgs, resolve_config};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::tables::{read_edge_records, read_node_table};

/// Arguments for `power-broker stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Report payload for `power-broker stats`.
#[derive(Debug, Serialize)]
pub struct GraphReport {
    pub nodes: usize,
    pub edges: usize,
    pub mode: String,
    pub views: Vec<ViewReport>,
}

/// Execute `power-broker stats`.
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded or scored.
pub fn run_stats(
    args: &StatsArgs,
    config_path: Option<&Path>,
    output: OutputMode,
    project_root: &Path,
) -> Result<()> {
    let config = resolve_config(config_path, project_root, &args.graph)?;
    let nodes = read_node_table(&args.graph.nodes, &config.columns)?;
    let edges = read_edge_records(&args.graph.edges, &config.columns)?;

    let report = ScoringPlan::power_broker(&config)
        .run(&nodes, &edges)
        .context("Scoring failed")?;

    let payload = GraphReport {
        nodes: nodes.len(),
        edges: edges.len(),
        mode: report.mode.to_string(),
        views: report.views,
    };

    render_mode(
        output,
        &payload,
        |payload, w| render_stats_text(payload, w),
        |payload, w| render_stats_pretty(payload, w),
    )
}

fn render_stats_text(payload: &GraphReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "view\tedges\texcluded\tcomponents\tisolated\tdensity\tmean\tmax\tfingerprint"
    )?;
    for view in &payload.views {
        let stats = &view.stats;
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{}",
            stats.label,
            stats.edge_count,
            stats.excluded_edge_count,
            stats.weakly_connected_component_count,
            stats.isolated_node_count,
            stats.density,
            view.scores.mean,
            view.scores.max,
            stats.fingerprint
        )?;
    }
    Ok(())
}

fn render_stats_pretty(payload: &GraphReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Input")?;
    pretty_kv(w, "Nodes", payload.nodes.to_string())?;
    pretty_kv(w, "Edge rows", payload.edges.to_string())?;
    pretty_kv(w, "Mode", &payload.mode)?;

    for view in &payload.views {
        let stats = &view.stats;
        writeln!(w)?;
        pretty_section(w, &format!("View {}", stats.label))?;
        pretty_kv(w, "Edges", stats.edge_count.to_string())?;
        pretty_kv(w, "Excluded edges", stats.excluded_edge_count.to_string())?;
        pretty_kv(w, "Self loops", stats.self_loop_count.to_string())?;
        pretty_kv(w, "Parallel edges", stats.parallel_edge_count.to_string())?;
        pretty_kv(
            w,
            "Weak components",
            stats.weakly_connected_component_count.to_string(),
        )?;
        pretty_kv(w, "Isolated nodes", stats.isolated_node_count.to_string())?;
        pretty_kv(
            w,
            "Max in/out degree",
            format!("{}/{}", stats.max_in_degree, stats.max_out_degree),
        )?;
        pretty_kv(w, "Density", format!("{:.6}", stats.density))?;
        pretty_kv(
            w,
            "Closeness",
            format!(
                "min={:.4} mean={:.4} max={:.4} zero={}",
                view.scores.min, view.scores.mean, view.scores.max, view.scores.zero_count
            ),
        )?;
        pretty_kv(w, "Fingerprint", &stats.fingerprint)?;
    }
    Ok(())
}
