//! Line classification for the block scanner
//!
//! Each source line is matched against a fixed, ordered set of patterns.
//! Block openers are recognized in any state; interior declarations only in
//! the state they belong to. Anything else classifies as [`LineKind::NoMatch`].

use protogo_common::{GeneratorError, Result};
use regex::{Captures, Regex};

use super::scanner::ScanState;

const MESSAGE_PATTERN: &str = r"message\s+(\w+)\s*\{";
const ENUM_PATTERN: &str = r"enum\s+(\w+)\s*\{";
const SERVICE_PATTERN: &str = r"service\s+(\w+)\s*\{";
const FIELD_PATTERN: &str = r"\s*(repeated)?\s*([\w\.]+)\s+(\w+)\s*=\s*\d+;";
const ENUM_VALUE_PATTERN: &str = r"\s*(\w+)\s*=\s*\d+;";
const RPC_PATTERN: &str = r"\s*rpc\s+(\w+)\s*\(([^)]+)\)\s*returns\s*\(([^)]+)\)";

const STREAM_QUALIFIER: &str = "stream ";

/// Kind of block a `{` line opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Message,
    Enum,
    Service,
}

impl BlockKind {
    /// Scanner state entered when this block opens
    pub fn state(self) -> ScanState {
        match self {
            BlockKind::Message => ScanState::InMessage,
            BlockKind::Enum => ScanState::InEnum,
            BlockKind::Service => ScanState::InService,
        }
    }
}

/// A message field declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub repeated: bool,
    pub proto_type: String,
    pub name: String,
    /// Trailing `//` comment text, trimmed
    pub comment: String,
}

/// An enum value declaration; the numeric value is not kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueDecl {
    pub name: String,
}

/// An rpc declaration with streaming qualifiers removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcDecl {
    pub method: String,
    pub request: String,
    pub response: String,
}

/// Result of classifying a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Blank or comment-only line
    Skip,
    Open { kind: BlockKind, name: String },
    Close,
    Field(FieldDecl),
    EnumValue(EnumValueDecl),
    Rpc(RpcDecl),
    NoMatch,
}

/// Compiled line matchers
#[derive(Debug, Clone)]
pub struct LineClassifier {
    message: Regex,
    enumeration: Regex,
    service: Regex,
    field: Regex,
    enum_value: Regex,
    rpc: Regex,
}

impl LineClassifier {
    /// Compile all matchers
    pub fn new() -> Result<Self> {
        Ok(Self {
            message: compile(MESSAGE_PATTERN)?,
            enumeration: compile(ENUM_PATTERN)?,
            service: compile(SERVICE_PATTERN)?,
            field: compile(FIELD_PATTERN)?,
            enum_value: compile(ENUM_VALUE_PATTERN)?,
            rpc: compile(RPC_PATTERN)?,
        })
    }

    /// Classify one raw source line in the given scanner state
    pub fn classify(&self, raw_line: &str, state: ScanState) -> LineKind {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with("//") {
            return LineKind::Skip;
        }

        let (code, comment) = split_comment(line);
        if code.is_empty() {
            return LineKind::Skip;
        }

        if let Some(open) = self.match_opener(code) {
            return open;
        }

        if code == "}" && state != ScanState::None {
            return LineKind::Close;
        }

        let declaration = match state {
            ScanState::InMessage => self.match_field(code, comment).map(LineKind::Field),
            ScanState::InEnum => self.match_enum_value(code).map(LineKind::EnumValue),
            ScanState::InService => self.match_rpc(code).map(LineKind::Rpc),
            ScanState::None => None,
        };

        declaration.unwrap_or(LineKind::NoMatch)
    }

    fn match_opener(&self, code: &str) -> Option<LineKind> {
        let openers = [
            (&self.message, BlockKind::Message),
            (&self.enumeration, BlockKind::Enum),
            (&self.service, BlockKind::Service),
        ];

        openers.into_iter().find_map(|(regex, kind)| {
            regex.captures(code).map(|caps| LineKind::Open {
                kind,
                name: group(&caps, 1),
            })
        })
    }

    /// Match a message field declaration
    pub fn match_field(&self, code: &str, comment: &str) -> Option<FieldDecl> {
        self.field.captures(code).map(|caps| FieldDecl {
            repeated: caps.get(1).is_some(),
            proto_type: group(&caps, 2),
            name: group(&caps, 3),
            comment: comment.to_string(),
        })
    }

    /// Match an enum value declaration
    pub fn match_enum_value(&self, code: &str) -> Option<EnumValueDecl> {
        self.enum_value
            .captures(code)
            .map(|caps| EnumValueDecl { name: group(&caps, 1) })
    }

    /// Match an rpc declaration
    pub fn match_rpc(&self, code: &str) -> Option<RpcDecl> {
        self.rpc.captures(code).map(|caps| RpcDecl {
            method: group(&caps, 1),
            request: strip_stream(&group(&caps, 2)),
            response: strip_stream(&group(&caps, 3)),
        })
    }
}

/// Split a trimmed line at the first `//` into code and comment parts
pub fn split_comment(line: &str) -> (&str, &str) {
    match line.split_once("//") {
        Some((code, comment)) => (code.trim(), comment.trim()),
        None => (line.trim(), ""),
    }
}

fn strip_stream(type_name: &str) -> String {
    type_name.replace(STREAM_QUALIFIER, "")
}

fn group(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| GeneratorError::Parse(format!("Invalid line pattern {pattern}: {e}")))
}
