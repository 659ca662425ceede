//! Common types and utilities for protogo
//!
//! This crate contains the error type and the intermediate representation
//! shared between the scanner (which produces a [`GoFile`]) and the
//! generator (which renders it to Go source text).

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// Import path every generated file needs for `context.Context`
pub const CONTEXT_IMPORT: &str = "\"context\"";

/// Errors that can occur while converting a schema
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for protogo operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Counters collected during a single scan pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub lines: usize,
    pub messages: usize,
    pub enums: usize,
    pub services: usize,
    pub fields: usize,
    pub enum_values: usize,
    pub rpcs: usize,
}

/// A generated Go file before assembly
///
/// `imports` holds fully quoted import paths (e.g. `"time"`); the set keeps
/// them de-duplicated and lexicographically ordered. `body` holds the emitted
/// lines in source order, without trailing newlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoFile {
    pub package: String,
    pub imports: BTreeSet<String>,
    pub body: Vec<String>,
    pub summary: ScanSummary,
}

impl GoFile {
    /// Empty file for `package`, seeded with the context import
    pub fn new(package: &str) -> Self {
        let mut imports = BTreeSet::new();
        imports.insert(CONTEXT_IMPORT.to_string());
        Self {
            package: package.to_string(),
            imports,
            body: Vec::new(),
            summary: ScanSummary::default(),
        }
    }
}
