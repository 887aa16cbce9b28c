#![forbid(unsafe_code)]

mod cmd;
mod output;
mod tables;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "power-broker: directed closeness scores for site networks",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Config file [default: ./power-broker.toml when present].
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Score every node and write the augmented node table",
        long_about = "Compute closeness over all edges and over all edges except one category, \
                      then write the node table with one column per view appended.",
        after_help = "EXAMPLES:\n    # Score with defaults (out-closeness, drop road edges)\n    power-broker score --nodes sites.csv --edges links.csv\n\n    # Incoming closeness, explicit output file\n    power-broker score --nodes sites.csv --edges links.csv --mode in --out scored.csv\n\n    # Emit a machine-readable summary\n    power-broker score --nodes sites.csv --edges links.csv --json"
    )]
    Score(cmd::score::ScoreArgs),

    #[command(
        about = "Describe the scored views",
        long_about = "Build and score each view, then report its shape and score summary \
                      without writing an output table.",
        after_help = "EXAMPLES:\n    # Human-readable report\n    power-broker stats --nodes sites.csv --edges links.csv\n\n    # Drop river edges instead of roads\n    power-broker stats --nodes sites.csv --edges links.csv --exclude-category river --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Bash\n    power-broker completions bash > ~/.local/share/bash-completion/completions/power-broker"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("POWER_BROKER_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "broker_core=debug,power_broker=debug,info"
        } else {
            "broker_core=info,power_broker=info,warn"
        })
    });

    let format = env::var("POWER_BROKER_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let output = cli.output_mode();
    let config_path = cli.config.as_deref();

    let command_result = match cli.command {
        Commands::Score(ref args) => {
            cmd::score::run_score(args, config_path, output, &project_root)
        }
        Commands::Stats(ref args) => {
            cmd::stats::run_stats(args, config_path, output, &project_root)
        }
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    };

    if let Err(err) = command_result {
        render_error(output, &CliError::from(&err))?;
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn score_requires_both_tables() {
        let result = Cli::try_parse_from(["power-broker", "score", "--nodes", "n.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn score_parses_overrides() {
        let cli = Cli::parse_from([
            "power-broker",
            "score",
            "--nodes",
            "n.csv",
            "--edges",
            "e.csv",
            "--mode",
            "all",
            "--exclude-category",
            "river",
            "--out",
            "o.csv",
        ]);
        let Commands::Score(args) = cli.command else {
            panic!("expected score command");
        };
        assert_eq!(args.graph.mode, Some(cmd::ModeArg::All));
        assert_eq!(args.graph.exclude_category.as_deref(), Some("river"));
        assert_eq!(args.out, Some(PathBuf::from("o.csv")));
    }

    #[test]
    fn sequential_conflicts_with_threads() {
        let result = Cli::try_parse_from([
            "power-broker",
            "stats",
            "--nodes",
            "n.csv",
            "--edges",
            "e.csv",
            "--sequential",
            "--threads",
            "4",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from([
            "power-broker",
            "stats",
            "--nodes",
            "n.csv",
            "--edges",
            "e.csv",
            "--json",
        ]);
        assert!(cli.json);
        assert_eq!(cli.output_mode(), OutputMode::Json);
    }

    #[test]
    fn format_flag_parsed() {
        let cli = Cli::parse_from(["power-broker", "--format", "text", "completions", "zsh"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn global_config_flag_parsed() {
        let cli = Cli::parse_from([
            "power-broker",
            "stats",
            "--config",
            "custom.toml",
            "--nodes",
            "n.csv",
            "--edges",
            "e.csv",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }
}
