use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::graph::view::ROAD_CATEGORY;
use crate::metrics::closeness::{Execution, Mode};
use crate::table::ColumnNames;

/// Config file looked up in the working directory when no path is given.
pub const CONFIG_FILE: &str = "power-broker.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_exclude_category")]
    pub exclude_category: String,
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Worker count for parallel runs; unset uses one per core.
    #[serde(default)]
    pub threads: Option<usize>,
    #[serde(default)]
    pub columns: ColumnNames,
    #[serde(default)]
    pub labels: LabelConfig,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            exclude_category: default_exclude_category(),
            parallel: default_true(),
            threads: None,
            columns: ColumnNames::default(),
            labels: LabelConfig::default(),
        }
    }
}

impl BrokerConfig {
    #[must_use]
    pub const fn execution(&self) -> Execution {
        if self.parallel {
            Execution::Parallel {
                threads: self.threads,
            }
        } else {
            Execution::Sequential
        }
    }

    /// Output column for the view without `exclude_category` edges.
    #[must_use]
    pub fn reduced_label(&self) -> String {
        self.labels
            .reduced
            .clone()
            .unwrap_or_else(|| format!("closeness_no_{}_edges", self.exclude_category))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    #[serde(default = "default_all_edges_label")]
    pub all_edges: String,
    /// Defaults to `closeness_no_<category>_edges`.
    #[serde(default)]
    pub reduced: Option<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            all_edges: default_all_edges_label(),
            reduced: None,
        }
    }
}

/// Load `power-broker.toml` from `dir`, or defaults if there is none.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(dir: &Path) -> Result<BrokerConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(BrokerConfig::default());
    }
    load_config_file(&path)
}

/// Load an explicitly named config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<BrokerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<BrokerConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::debug!(path = %path.display(), mode = %config.mode, "config loaded");
    Ok(config)
}

fn default_true() -> bool {
    true
}

fn default_exclude_category() -> String {
    ROAD_CATEGORY.to_string()
}

fn default_all_edges_label() -> String {
    "closeness_all_edges".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config, BrokerConfig::default());
        assert_eq!(config.mode, Mode::Out);
        assert_eq!(config.reduced_label(), "closeness_no_road_edges");
        assert_eq!(config.execution(), Execution::Parallel { threads: None });
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "mode = \"all\"\nexclude_category = \"river\"\nparallel = false\n\n\
             [columns]\ncategory = \"kind\"\n",
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.mode, Mode::All);
        assert_eq!(config.columns.category, "kind");
        assert_eq!(config.columns.id, "id");
        assert_eq!(config.reduced_label(), "closeness_no_river_edges");
        assert_eq!(config.labels.all_edges, "closeness_all_edges");
        assert_eq!(config.execution(), Execution::Sequential);
    }

    #[test]
    fn explicit_labels_win() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[labels]\nall_edges = \"cc_all\"\nreduced = \"cc_sea\"\n").unwrap();
        let config = load_config_file(&path).unwrap();
        assert_eq!(config.labels.all_edges, "cc_all");
        assert_eq!(config.reduced_label(), "cc_sea");
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "mode = \"sideways\"\n").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse"));
        assert!(
            err.chain()
                .any(|cause| cause.downcast_ref::<toml::de::Error>().is_some())
        );
    }
}
