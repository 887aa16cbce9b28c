pub mod completions;
pub mod score;
pub mod stats;

use std::path::{Path, PathBuf};

use anyhow::Result;
use broker_core::config::{BrokerConfig, load_config, load_config_file};
use broker_core::metrics::Mode;
use clap::{Args, ValueEnum};

/// Closeness direction as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Follow outgoing edges.
    Out,
    /// Follow incoming edges.
    In,
    /// Ignore edge direction.
    All,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Out => Self::Out,
            ModeArg::In => Self::In,
            ModeArg::All => Self::All,
        }
    }
}

/// Input tables and view options shared by `score` and `stats`.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Node table CSV (must contain the id column).
    #[arg(long)]
    pub nodes: PathBuf,

    /// Edge table CSV (source, target and type columns).
    #[arg(long)]
    pub edges: PathBuf,

    /// Closeness direction [default: out, or `mode` from the config file].
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Edge category dropped from the reduced view [default: road].
    #[arg(long)]
    pub exclude_category: Option<String>,

    /// Score nodes on the calling thread only.
    #[arg(long, conflicts_with = "threads")]
    pub sequential: bool,

    /// Worker threads for parallel scoring [default: one per core].
    #[arg(long)]
    pub threads: Option<usize>,
}

impl GraphArgs {
    /// Apply command-line overrides on top of file configuration.
    pub fn apply(&self, config: &mut BrokerConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(ref category) = self.exclude_category {
            config.exclude_category.clone_from(category);
        }
        if self.sequential {
            config.parallel = false;
        }
        if let Some(threads) = self.threads {
            config.parallel = true;
            config.threads = Some(threads);
        }
    }
}

/// Load the config file (explicit path, or `power-broker.toml` in
/// `project_root`) and apply command-line overrides.
pub fn resolve_config(
    config_path: Option<&Path>,
    project_root: &Path,
    args: &GraphArgs,
) -> Result<BrokerConfig> {
    let mut config = match config_path {
        Some(path) => load_config_file(path)?,
        None => load_config(project_root)?,
    };
    args.apply(&mut config);
    Ok(config)
}
