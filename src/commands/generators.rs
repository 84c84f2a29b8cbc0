use crate::config::AppConfig;
use crate::report::{BatchReport, run_batch};
use crate::rewrite::driver::WriteMode;
use crate::rewrite::rules::generator_comment_rules;
use anyhow::{Context, Result};
use std::io::Write;

/// Rewrite the legacy comment-lines block in the configured generator sources.
pub fn simplify_generators(
    cfg: &AppConfig,
    mode: WriteMode,
    out: &mut impl Write,
) -> Result<BatchReport> {
    let rules = generator_comment_rules().context("invalid generator rule set")?;
    let paths = cfg.generator_source_paths();
    tracing::info!(files = paths.len(), ?mode, "simplify generators start");

    writeln!(out, "Processing aggregate generators...")?;
    writeln!(out)?;
    let report = run_batch(&paths, &rules, mode);
    report.render(out)?;
    writeln!(out)?;
    writeln!(out, "Done!")?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::OutcomeKind;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const LEGACY: &str = "fun build() {\n    // 准备注释行\n    val commentLines = SqlSchemaUtils.getComment(table)\n        .split(Regex(AbstractCodegenTask.PATTERN_LINE_BREAK))\n        .map { it.trim() }\n\n    with(context) {\n        resultContext.putContext(tag, \"commentLines\", commentLines)\n    }\n}\n";

    #[test]
    fn synthetic_sources_are_processed_in_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Entity.kt"), LEGACY).unwrap();
        fs::write(dir.path().join("Factory.kt"), "fun build() {}\n").unwrap();

        let mut cfg = AppConfig::with_defaults(dir.path());
        cfg.generator_sources = vec![
            PathBuf::from("Entity.kt"),
            PathBuf::from("Missing.kt"),
            PathBuf::from("Factory.kt"),
        ];

        let mut out = Vec::new();
        let report = simplify_generators(&cfg, WriteMode::Write, &mut out).unwrap();
        assert_eq!(report.total(), 3);
        assert_eq!(report.count(OutcomeKind::Updated), 1);
        assert_eq!(report.count(OutcomeKind::NotFound), 1);
        assert_eq!(report.count(OutcomeKind::Unchanged), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("Entity.kt")).unwrap(),
            "fun build() {\n    resultContext.putContext(tag, \"Comment\", SqlSchemaUtils.getComment(table))\n}\n"
        );

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Processing aggregate generators...\n\n✓ Updated: Entity.kt\n"));
        assert!(text.contains("⚠ Not found: Missing.kt\n"));
        assert!(text.trim_end().ends_with("Done!"));
    }
}
