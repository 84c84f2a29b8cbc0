//! Per-file rewrite: read, transform, compare, write back only on change.

use super::RuleSet;
use crate::error::RewriteError;
use crate::fsio;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Write,
    /// Classify files without writing anything.
    DryRun,
}

impl WriteMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run { Self::DryRun } else { Self::Write }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Updated { hits: usize },
    Unchanged,
}

pub fn rewrite_file(
    path: &Path,
    rules: &RuleSet,
    mode: WriteMode,
) -> Result<FileStatus, RewriteError> {
    let original = fsio::read_text(path)?;
    let rewrite = rules.apply(&original)?;

    if !rewrite.changed {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(FileStatus::Unchanged);
    }

    let hits = rewrite.total_hits();
    match mode {
        WriteMode::Write => fsio::write_text_atomic(path, &rewrite.text)?,
        WriteMode::DryRun => tracing::info!("dry run, not writing {}", path.display()),
    }
    tracing::debug!(hits, "updated: {}", path.display());
    Ok(FileStatus::Updated { hits })
}
