//! Per-file outcome classification and the batch summary.

use crate::error::RewriteError;
use crate::rewrite::RuleSet;
use crate::rewrite::driver::{FileStatus, WriteMode, rewrite_file};
use std::borrow::Cow;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Updated,
    Unchanged,
    NotFound,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Unchanged,
    NotFound,
    /// Carries the rendered cause.
    Error(String),
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Updated => OutcomeKind::Updated,
            Outcome::Unchanged => OutcomeKind::Unchanged,
            Outcome::NotFound => OutcomeKind::NotFound,
            Outcome::Error(_) => OutcomeKind::Error,
        }
    }
}

impl From<Result<FileStatus, RewriteError>> for Outcome {
    fn from(result: Result<FileStatus, RewriteError>) -> Self {
        match result {
            Ok(FileStatus::Updated { .. }) => Outcome::Updated,
            Ok(FileStatus::Unchanged) => Outcome::Unchanged,
            Err(RewriteError::NotFound(_)) => Outcome::NotFound,
            Err(e) => Outcome::Error(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl FileReport {
    fn file_name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.path.to_string_lossy())
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    files: Vec<FileReport>,
    updated: usize,
    unchanged: usize,
    not_found: usize,
    errors: usize,
    dry_run: bool,
}

impl BatchReport {
    pub fn new(mode: WriteMode) -> Self {
        Self {
            dry_run: mode == WriteMode::DryRun,
            ..Self::default()
        }
    }

    /// Record a finished file. Counters are only touched here.
    pub fn record(&mut self, path: impl Into<PathBuf>, outcome: Outcome) {
        match outcome.kind() {
            OutcomeKind::Updated => self.updated += 1,
            OutcomeKind::Unchanged => self.unchanged += 1,
            OutcomeKind::NotFound => self.not_found += 1,
            OutcomeKind::Error => self.errors += 1,
        }
        self.files.push(FileReport {
            path: path.into(),
            outcome,
        });
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        match kind {
            OutcomeKind::Updated => self.updated,
            OutcomeKind::Unchanged => self.unchanged,
            OutcomeKind::NotFound => self.not_found,
            OutcomeKind::Error => self.errors,
        }
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        for file in &self.files {
            let name = file.file_name();
            match &file.outcome {
                Outcome::Updated => writeln!(out, "✓ Updated: {name}")?,
                Outcome::Unchanged => writeln!(out, "  No change: {name}")?,
                Outcome::NotFound => writeln!(out, "⚠ Not found: {name}")?,
                Outcome::Error(cause) => writeln!(out, "✗ Error: {name} - {cause}")?,
            }
        }

        writeln!(out)?;
        if self.dry_run {
            writeln!(out, "=== Summary (dry run) ===")?;
        } else {
            writeln!(out, "=== Summary ===")?;
        }
        writeln!(out, "Updated: {} files", self.updated)?;
        writeln!(out, "Unchanged: {} files", self.unchanged)?;
        writeln!(out, "Not found: {} files", self.not_found)?;
        writeln!(out, "Errors: {} files", self.errors)?;
        writeln!(out, "Total: {} files", self.total())?;
        Ok(())
    }
}

/// Run the driver over `paths` in order and collect one outcome per path.
pub fn run_batch<P: AsRef<Path>>(paths: &[P], rules: &RuleSet, mode: WriteMode) -> BatchReport {
    let mut report = BatchReport::new(mode);
    for path in paths {
        let path = path.as_ref();
        let outcome = Outcome::from(rewrite_file(path, rules, mode));
        match &outcome {
            Outcome::NotFound => tracing::warn!("not found: {}", path.display()),
            Outcome::Error(cause) => tracing::warn!("failed: {}: {}", path.display(), cause),
            _ => {}
        }
        report.record(path, outcome);
    }
    tracing::info!(
        total = report.total(),
        updated = report.updated,
        errors = report.errors,
        "batch finished"
    );
    report
}
