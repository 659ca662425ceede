//! `.proto` source file parser

use protogo_common::{GeneratorError, GoFile, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

use super::classifier::LineClassifier;
use super::scanner::scan_source;

/// Parser for `.proto` schema sources
///
/// Holds the schema text and the Go package name the output belongs to.
pub struct ProtoParser {
    /// Compiled line matchers
    classifier: LineClassifier,

    /// Schema source text
    source: String,

    /// Target Go package (e.g., "models")
    package: String,
}

impl ProtoParser {
    /// Load a schema from a file
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = ProtoParser::from_file("user.proto", "models")?;
    /// let go_file = parser.parse();
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P, package: &str) -> Result<Self> {
        let path = path.as_ref();
        info!("Starting conversion for file: {}", path.display());

        let source = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GeneratorError::InputNotFound(path.to_path_buf()),
            _ => GeneratorError::Io(e),
        })?;

        Self::from_source(source, package)
    }

    /// Create a parser over in-memory schema text
    pub fn from_source(source: impl Into<String>, package: &str) -> Result<Self> {
        Ok(Self {
            classifier: LineClassifier::new()?,
            source: source.into(),
            package: package.to_string(),
        })
    }

    /// Scan the schema into a Go file
    pub fn parse(&self) -> GoFile {
        let file = scan_source(&self.classifier, &self.source, &self.package);
        info!(
            lines = file.summary.lines,
            messages = file.summary.messages,
            enums = file.summary.enums,
            services = file.summary.services,
            "Parsed {} lines. Generating Go code...",
            file.summary.lines
        );
        file
    }
}
