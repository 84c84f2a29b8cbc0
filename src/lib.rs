//! Batch maintenance for code-generation assets.
//!
//! Two jobs share one rewrite engine: collapsing the legacy `commentLines`
//! handling in generator sources and templates, and reporting the literal
//! imports templates hard-code.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod fsio;
pub mod report;
pub mod rewrite;

use anyhow::Result;

/// Main entry point for CLI usage
pub fn run_cli() -> Result<()> {
    cli::run_cli()
}

/// Entry point for CLI usage with custom arguments
pub fn run_cli_with<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    cli::run_cli_with(args)
}
