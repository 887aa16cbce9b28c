//! `power-broker score`: write the node table with closeness columns appended.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use broker_core::ScoringPlan;
use broker_core::pipeline::ViewReport;
use clap::Args;
use serde::Serialize;

use super::{GraphArgs, resolve_config};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::tables::{read_edge_records, read_node_table, write_score_table};

/// Suffix appended to the node file stem when `--out` is not given.
const DEFAULT_OUTPUT_SUFFIX: &str = "_with_power_broker_scores.csv";

/// Arguments for `power-broker score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Output CSV [default: `<nodes stem>_with_power_broker_scores.csv`
    /// next to the node table].
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ScoreOutcome {
    output: String,
    rows: usize,
    mode: String,
    views: Vec<ViewReport>,
}

/// Output path used when `--out` is absent.
fn default_output_path(nodes: &Path) -> PathBuf {
    let stem = nodes
        .file_stem()
        .unwrap_or_else(|| OsStr::new("nodes"))
        .to_string_lossy();
    nodes.with_file_name(format!("{stem}{DEFAULT_OUTPUT_SUFFIX}"))
}

/// Execute `power-broker score`.
///
/// # Errors
///
/// Returns an error if the config or either table cannot be loaded,
/// scoring fails, or the output cannot be written.
pub fn run_score(
    args: &ScoreArgs,
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

    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| default_output_path(&args.graph.nodes));
    write_score_table(&out_path, &report.table)?;

    let outcome = ScoreOutcome {
        output: out_path.display().to_string(),
        rows: report.table.len(),
        mode: report.mode.to_string(),
        views: report.views,
    };

    render_mode(
        output,
        &outcome,
        |outcome, w| writeln!(w, "Wrote {}", outcome.output),
        |outcome, w| render_score_pretty(outcome, w),
    )
}

fn render_score_pretty(outcome: &ScoreOutcome, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "Wrote {}", outcome.output)?;
    writeln!(w)?;
    pretty_section(w, "Scores")?;
    pretty_kv(w, "Rows", outcome.rows.to_string())?;
    pretty_kv(w, "Mode", &outcome.mode)?;
    for view in &outcome.views {
        pretty_kv(
            w,
            &view.stats.label,
            format!(
                "edges={} min={:.4} mean={:.4} max={:.4} zero={}",
                view.stats.edge_count,
                view.scores.min,
                view.scores.mean,
                view.scores.max,
                view.scores.zero_count
            ),
        )?;
    }
    Ok(())
}
