use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Per-file failures of the rewrite driver. None of these abort a batch.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The rewritten text is still matched by a rule, so a second run would
    /// change it again.
    #[error("rule `{rule}` still matches after rewrite")]
    Pattern { rule: String },
}

/// Construction-time failures of grammars and rule sets. These are fatal.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("rule `{rule}` has no literal anchor of at least {min} characters")]
    NoAnchor { rule: String, min: usize },

    #[error("rule `{rule}` compiled to an invalid regex: {source}")]
    Regex {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("replacement of rule `{rule}` is matched by rule `{by}`")]
    Reapplies { rule: String, by: String },
}
