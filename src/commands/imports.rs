use crate::config::AppConfig;
use crate::extract::{ImportRecord, analyze_templates, render_imports};
use anyhow::{Result, bail};
use std::io::Write;

/// Report the literal imports of every mapped template.
pub fn analyze_imports(cfg: &AppConfig, out: &mut impl Write) -> Result<Vec<ImportRecord>> {
    let dir = cfg.templates_path();
    if !dir.is_dir() {
        bail!("templates directory not found: {}", dir.display());
    }
    tracing::info!(templates = cfg.template_generators.len(), dir = %dir.display(), "analyze imports start");
    let records = analyze_templates(&dir, &cfg.template_generators);
    render_imports(&records, out)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateGenerator;
    use crate::extract::ImportStatus;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn uses_synthetic_mapping() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("t")).unwrap();
        fs::write(dir.path().join("t/enum.kt.peb"), "import com.example.Foo\n").unwrap();

        let mut cfg = AppConfig::with_defaults(dir.path());
        cfg.templates_dir = "t".into();
        cfg.template_generators = vec![TemplateGenerator::new("enum.kt.peb", "Enum")];

        let mut out = Vec::new();
        let records = analyze_imports(&cfg, &mut out).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].status,
            ImportStatus::Literal(vec!["com.example.Foo".into()])
        );
        assert!(String::from_utf8(out).unwrap().contains("✓ EnumImportManager:"));
    }

    #[test]
    fn missing_templates_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::with_defaults(dir.path());
        let err = analyze_imports(&cfg, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("templates directory not found"));
    }
}
