use crate::config::AppConfig;
use crate::fsio::list_files_with_extension;
use crate::report::{BatchReport, run_batch};
use crate::rewrite::driver::WriteMode;
use crate::rewrite::rules::template_comment_rules;
use anyhow::{Context, Result, bail};
use std::io::Write;

/// Rewrite the `commentLines` loop in every template of the templates directory.
pub fn simplify_templates(
    cfg: &AppConfig,
    mode: WriteMode,
    out: &mut impl Write,
) -> Result<BatchReport> {
    let dir = cfg.templates_path();
    if !dir.is_dir() {
        bail!("templates directory not found: {}", dir.display());
    }
    let rules = template_comment_rules().context("invalid template rule set")?;
    let files = list_files_with_extension(&dir, &cfg.template_extension)?;
    tracing::info!(files = files.len(), ?mode, "simplify templates start");

    writeln!(out, "Processing templates in: {}", dir.display())?;
    writeln!(out)?;
    let report = run_batch(&files, &rules, mode);
    report.render(out)?;
    writeln!(out)?;
    writeln!(out, "Done!")?;
    Ok(report)
}
