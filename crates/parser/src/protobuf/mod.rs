//! `.proto` schema scanner
//!
//! Converts a subset of the Protocol Buffers schema language into Go
//! declarations without building a grammar or AST. Lines are classified one
//! at a time and fed through a small state machine.
//!
//! ## Supported constructs
//! - `message` blocks with scalar, well-known, repeated and message-typed fields
//! - `enum` blocks (values are renumbered with `iota`)
//! - `service` blocks with unary and streaming `rpc` declarations
//!
//! Nested messages, imports, options, `oneof`, maps, reserved fields and
//! multi-line declarations are skipped.
//!
//! ## Example
//! ```rust
//! use protogo_parser::ProtoParser;
//!
//! let parser = ProtoParser::from_source("message User {\n string name = 1;\n}", "models")?;
//! let go_file = parser.parse();
//! assert_eq!(go_file.body[1], "type User struct {");
//! # Ok::<(), protogo_common::GeneratorError>(())
//! ```

mod classifier;
mod parser;
mod scanner;

pub use classifier::{
    split_comment, BlockKind, EnumValueDecl, FieldDecl, LineClassifier, LineKind, RpcDecl,
};
pub use parser::ProtoParser;
pub use scanner::{scan_source, BlockScanner, ScanState};
