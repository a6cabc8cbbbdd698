//! procedure-lint CLI tool.
//!
//! Usage:
//! ```bash
//! procedure-lint check [OPTIONS] [PATH]
//! procedure-lint list-rules
//! procedure-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Convention checker for JSON-RPC procedure classes
#[derive(Parser)]
#[command(name = "procedure-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PROCEDURE_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks over class snapshots
    Check {
        /// Snapshot directory or single snapshot file (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Snapshot files that only provide types, e.g. vendor framework classes
        #[arg(long)]
        externals: Vec<PathBuf>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Rich diagnostics rendered by miette.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
            externals,
        } => {
            let source = config_resolver::resolve(&project_dir(&path), cli.config.as_deref());
            let options = commands::check::CheckOptions {
                format,
                rules,
                exclude,
                externals,
            };
            let has_errors = commands::check::run(&path, &options, &source)?;
            if has_errors {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(std::path::Path::new("."), force),
    }
}

/// Directory searched for a project config: the path itself, or the parent
/// of a single snapshot file.
fn project_dir(path: &std::path::Path) -> PathBuf {
    if path.is_file() {
        path.parent()
            .map_or_else(|| PathBuf::from("."), std::path::Path::to_path_buf)
    } else {
        path.to_path_buf()
    }
}
