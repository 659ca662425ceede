//! Go source generation for protogo
//!
//! This crate turns a scanned [`GoFile`] into the final Go source text:
//! package clause, sorted import block and the emitted declarations. An
//! optional `gofmt` pass is available through the [`Formatter`] trait.

mod formatter;
mod templates;

pub use formatter::{format_or_original, FormatOutcome, Formatter, Gofmt, DEFAULT_FORMAT_TIMEOUT};

use protogo_common::{GeneratorError, GoFile, Result};
use std::fs;
use std::path::Path;
use tera::Tera;
use tracing::debug;

/// Go source generator
///
/// Renders a [`GoFile`] into Go source text:
/// - `package` clause
/// - `import (...)` block, entries sorted, omitted when empty
/// - emitted body lines, verbatim
pub struct GoGenerator {
    tera: Tera,
}

impl GoGenerator {
    /// Create a new generator with the built-in templates
    pub fn new() -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { tera })
    }

    /// Render a Go file to source text
    pub fn render(&self, file: &GoFile) -> Result<String> {
        let context = Self::create_context(file);
        let rendered = self
            .tera
            .render(templates::GO_FILE_TEMPLATE, &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {e:?}")))?;

        debug!(
            bytes = rendered.len(),
            imports = file.imports.len(),
            "Assembled Go source"
        );
        Ok(rendered)
    }

    /// Render a Go file and write it to `output_path`
    pub fn generate_to_file(&self, file: &GoFile, output_path: &Path) -> Result<()> {
        let rendered = self.render(file)?;
        fs::write(output_path, rendered).map_err(|e| {
            GeneratorError::Generation(format!(
                "Failed to write {}: {}",
                output_path.display(),
                e
            ))
        })
    }

    /// Create template context from a GoFile
    fn create_context(file: &GoFile) -> tera::Context {
        let mut context = tera::Context::new();
        context.insert("file", file);
        context
    }
}

/// Assemble Go source text (convenience function)
pub fn assemble(file: &GoFile) -> Result<String> {
    GoGenerator::new()?.render(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn go_file(imports: &[&str], body: &[&str]) -> GoFile {
        let mut file = GoFile::new("models");
        file.imports = imports.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>();
        file.body = body.iter().map(|s| s.to_string()).collect();
        file
    }

    #[test]
    fn test_render_with_imports_and_body() {
        let file = go_file(
            &["\"time\"", "\"context\""],
            &["type A struct {", "}", ""],
        );
        let rendered = assemble(&file).unwrap();

        assert_eq!(
            rendered,
            "package models\n\nimport (\n\t\"context\"\n\t\"time\"\n)\n\ntype A struct {\n}\n"
        );
    }

    #[test]
    fn test_render_without_imports() {
        let file = go_file(&[], &["type A byte"]);
        assert_eq!(assemble(&file).unwrap(), "package models\n\ntype A byte");
    }

    #[test]
    fn test_render_without_body() {
        let file = go_file(&["\"context\""], &[]);
        assert_eq!(
            assemble(&file).unwrap(),
            "package models\n\nimport (\n\t\"context\"\n)\n"
        );
    }

    #[test]
    fn test_render_keeps_backticks_and_quotes() {
        let file = go_file(&["\"context\""], &["\tName string `json:\"name,omitempty\"`"]);
        let rendered = assemble(&file).unwrap();
        assert!(rendered.ends_with("\tName string `json:\"name,omitempty\"`"));
    }
}
