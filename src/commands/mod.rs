mod generators;
mod imports;
mod templates;

pub use generators::simplify_generators;
pub use imports::analyze_imports;
pub use templates::simplify_templates;
