//! Schema parsing for protogo
//!
//! This crate turns `.proto` schema text into a [`GoFile`] (import set plus
//! emitted Go body lines) ready for assembly by `protogo-generator`.
//!
//! ## Conversion rules
//! - Scalars map through [`TypeMapper`]; unknown names pass through verbatim
//! - Field names become exported Go names via [`to_exported_name`]
//! - A trailing `// ... uuid ...` comment turns a field into `uuid.UUID`
//! - Enums become `byte`-backed constants numbered with `iota`
//! - Services become interfaces taking `context.Context`
//!
//! [`GoFile`]: protogo_common::GoFile

mod naming;
mod protobuf;
mod type_mapper;

pub use naming::to_exported_name;
pub use protobuf::{
    scan_source, split_comment, BlockKind, BlockScanner, EnumValueDecl, FieldDecl,
    LineClassifier, LineKind, ProtoParser, RpcDecl, ScanState,
};
pub use type_mapper::{TypeMapper, GO_TIME, GO_UUID, TIME_IMPORT, UUID_IMPORT};

use protogo_common::{GoFile, Result};
use std::path::Path;

/// Parse a `.proto` file into a Go file for `package`
///
/// # Arguments
/// * `path` - Path to the schema file
/// * `package` - Go package name of the generated file
pub fn parse_proto_file<P: AsRef<Path>>(path: P, package: &str) -> Result<GoFile> {
    let parser = ProtoParser::from_file(path, package)?;
    Ok(parser.parse())
}
