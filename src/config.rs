use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Looked up in the project root when no explicit config file is given.
pub const CONFIG_FILE_NAME: &str = "template-tidy.toml";

const DEFAULT_TEMPLATES_DIR: &str = "plugin/src/main/resources/templates";
const DEFAULT_TEMPLATE_EXTENSION: &str = "peb";
const DEFAULT_GENERATOR_DIR: &str = "plugin/src/main/kotlin/com/only/codegen/generators/aggregate";
const DEFAULT_GENERATORS: [&str; 6] = [
    "EntityGenerator.kt",
    "DomainEventGenerator.kt",
    "DomainEventHandlerGenerator.kt",
    "FactoryGenerator.kt",
    "SpecificationGenerator.kt",
    "SchemaGenerator.kt",
];
const DEFAULT_TEMPLATE_GENERATORS: [(&str, &str); 12] = [
    ("command.kt.peb", "Command"),
    ("query.kt.peb", "Query"),
    ("domain_event.kt.peb", "DomainEvent"),
    ("domain_event_handler.kt.peb", "DomainEventHandler"),
    ("factory.kt.peb", "Factory"),
    ("aggregate.kt.peb", "Aggregate"),
    ("enum.kt.peb", "Enum"),
    ("client.kt.peb", "Client"),
    ("client_handler.kt.peb", "ClientHandler"),
    ("domain_service.kt.peb", "DomainService"),
    ("integration_event.kt.peb", "IntegrationEvent"),
    ("integration_event_handler.kt.peb", "IntegrationEventHandler"),
];

/// Template file name and the generator that renders it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateGenerator {
    pub template: String,
    pub generator: String,
}

impl TemplateGenerator {
    pub fn new(template: impl Into<String>, generator: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            generator: generator.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base for every relative path below.
    pub root: PathBuf,
    pub templates_dir: PathBuf,
    /// Without the leading dot.
    pub template_extension: String,
    /// Explicit, ordered list of generator sources to rewrite.
    pub generator_sources: Vec<PathBuf>,
    pub template_generators: Vec<TemplateGenerator>,
}

// --- Raw TOML structures ---
#[derive(Deserialize)]
struct ConfigFile {
    template_tidy: Option<TidyToml>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TidyToml {
    templates_dir: Option<String>,
    template_extension: Option<String>,
    generator_sources: Option<Vec<String>>,
    generators: Option<Vec<TemplateGenerator>>,
}

impl AppConfig {
    /// The compiled-in project layout.
    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            template_extension: DEFAULT_TEMPLATE_EXTENSION.to_string(),
            generator_sources: DEFAULT_GENERATORS
                .iter()
                .map(|f| Path::new(DEFAULT_GENERATOR_DIR).join(f))
                .collect(),
            template_generators: DEFAULT_TEMPLATE_GENERATORS
                .iter()
                .map(|(t, g)| TemplateGenerator::new(*t, *g))
                .collect(),
        }
    }

    /// Defaults, overridden by `config_path` or by `<root>/template-tidy.toml`
    /// when that file exists.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let mut cfg = Self::with_defaults(root);
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    tracing::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, root.display());
                    return Ok(cfg);
                }
                candidate
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        let Some(tidy) = file.template_tidy else {
            bail!("[template_tidy] not found in {}", path.display());
        };

        if let Some(dir) = tidy.templates_dir {
            cfg.templates_dir = PathBuf::from(dir);
        }
        if let Some(ext) = tidy.template_extension {
            let ext = ext.trim_start_matches('.');
            if ext.is_empty() {
                bail!("template_extension must not be empty");
            }
            cfg.template_extension = ext.to_string();
        }
        if let Some(sources) = tidy.generator_sources {
            cfg.generator_sources = sources.into_iter().map(PathBuf::from).collect();
        }
        if let Some(generators) = tidy.generators {
            cfg.template_generators = generators;
        }
        tracing::debug!(config = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn templates_path(&self) -> PathBuf {
        self.resolve(&self.templates_dir)
    }

    pub fn generator_source_paths(&self) -> Vec<PathBuf> {
        self.generator_sources
            .iter()
            .map(|p| self.resolve(p))
            .collect()
    }
}
