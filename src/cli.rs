use crate::commands;
use crate::config::AppConfig;
use crate::rewrite::driver::WriteMode;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "template-tidy",
    version,
    about = "Keeps code-generation templates and generators consistent"
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv). Uses RUST_LOG under the hood
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project root that configured paths are relative to
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to <root>/template-tidy.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report the literal (non-templated) imports of each generator template
    Imports,
    /// Collapse the legacy commentLines block in aggregate generator sources
    Generators {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Replace the commentLines loop in templates with a single Comment line
    Templates {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    // A subscriber may already be installed when driven in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

pub fn run_cli() -> Result<()> {
    run_cli_with(std::env::args())
}

pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let cli = Cli::parse_from(args.into_iter().map(Into::<String>::into));
    init_tracing(cli.verbose);

    let cfg = AppConfig::load(&cli.root, cli.config.as_deref()).context("failed to load config")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Imports => {
            commands::analyze_imports(&cfg, &mut out)?;
        }
        Commands::Generators { dry_run } => {
            commands::simplify_generators(&cfg, WriteMode::from_dry_run(dry_run), &mut out)?;
        }
        Commands::Templates { dry_run } => {
            commands::simplify_templates(&cfg, WriteMode::from_dry_run(dry_run), &mut out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_options_after_subcommand() {
        let cli = Cli::parse_from(["template-tidy", "templates", "--dry-run", "--root", "proj", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, PathBuf::from("proj"));
        assert!(matches!(cli.command, Commands::Templates { dry_run: true }));
    }

    #[test]
    fn root_defaults_to_current_directory() {
        let cli = Cli::parse_from(["template-tidy", "imports"]);
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.config.is_none());
    }

    #[test]
    fn missing_templates_directory_propagates_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_string_lossy().to_string();
        let err = run_cli_with(["template-tidy", "--root", root.as_str(), "templates"]).unwrap_err();
        assert!(err.to_string().contains("templates directory not found"));
    }
}
