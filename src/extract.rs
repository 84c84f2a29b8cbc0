//! Literal import extraction from templates.
//!
//! Only imports that are written out verbatim are collected; lines carrying a
//! `{{ ... }}` interpolation are generated conditionally and skipped. This is
//! a textual pass, the imports themselves are never parsed.

use crate::config::TemplateGenerator;
use crate::error::RewriteError;
use crate::fsio;
use std::io::{self, Write};
use std::path::Path;

const IMPORT_KEYWORD: &str = "import ";
const INTERPOLATION_MARKER: &str = "{{";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    Missing,
    Unreadable(String),
    /// The template exists but every import is templated.
    DynamicOnly,
    Literal(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub generator: String,
    pub template: String,
    pub status: ImportStatus,
}

/// Fully literal imports of `text`, keyword stripped, in file order.
pub fn extract_literal_imports(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.contains(INTERPOLATION_MARKER))
        .filter_map(|line| line.trim().strip_prefix(IMPORT_KEYWORD))
        .map(|rest| rest.trim().to_string())
        .collect()
}

pub fn analyze_templates(templates_dir: &Path, mapping: &[TemplateGenerator]) -> Vec<ImportRecord> {
    mapping
        .iter()
        .map(|entry| {
            let path = templates_dir.join(&entry.template);
            let status = match fsio::read_text(&path) {
                Ok(text) => {
                    let imports = extract_literal_imports(&text);
                    tracing::debug!(template = %entry.template, imports = imports.len(), "scanned");
                    if imports.is_empty() {
                        ImportStatus::DynamicOnly
                    } else {
                        ImportStatus::Literal(imports)
                    }
                }
                Err(RewriteError::NotFound(_)) => ImportStatus::Missing,
                Err(e) => {
                    tracing::warn!("{}", e);
                    ImportStatus::Unreadable(e.to_string())
                }
            };
            ImportRecord {
                generator: entry.generator.clone(),
                template: entry.template.clone(),
                status,
            }
        })
        .collect()
}

pub fn render_imports(records: &[ImportRecord], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "=== Template Imports Analysis ===")?;
    writeln!(out)?;
    for record in records {
        match &record.status {
            ImportStatus::Missing => writeln!(out, "⚠ {} - NOT FOUND", record.template)?,
            ImportStatus::Unreadable(cause) => {
                writeln!(out, "✗ {} - {}", record.template, cause)?;
            }
            ImportStatus::DynamicOnly => {
                writeln!(
                    out,
                    "✓ {}ImportManager - No base imports (dynamic only)",
                    record.generator
                )?;
                writeln!(out)?;
            }
            ImportStatus::Literal(imports) => {
                writeln!(out, "✓ {}ImportManager:", record.generator)?;
                writeln!(out, "  File: {}", record.template)?;
                writeln!(out, "  Base imports:")?;
                for import in imports {
                    writeln!(out, "    - {import}")?;
                }
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
