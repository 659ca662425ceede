//! Block scanner state machine
//!
//! Consumes schema lines one at a time, tracks which block is open, and
//! appends the corresponding Go declarations to the [`GoFile`] being built.
//! Only one level of nesting is modelled: opening a block while another is
//! open replaces the current state and the outer block is not resumed.

use protogo_common::GoFile;
use tracing::{debug, info, warn};

use super::classifier::{BlockKind, EnumValueDecl, FieldDecl, LineClassifier, LineKind, RpcDecl};
use crate::naming::to_exported_name;
use crate::type_mapper::{TypeMapper, GO_UUID};

/// Block the scanner is currently inside
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    None,
    InMessage,
    InService,
    InEnum,
}

/// Context of the open block needed by later lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PendingBlock {
    name: String,
    /// Next enum value is the first of its block and gets `= iota`
    first_value: bool,
}

/// Single-pass scanner turning schema lines into Go declarations
pub struct BlockScanner<'a> {
    classifier: &'a LineClassifier,
    state: ScanState,
    pending: PendingBlock,
    file: GoFile,
}

impl<'a> BlockScanner<'a> {
    /// Create a scanner emitting into a fresh file for `package`
    pub fn new(classifier: &'a LineClassifier, package: &str) -> Self {
        Self {
            classifier,
            state: ScanState::None,
            pending: PendingBlock::default(),
            file: GoFile::new(package),
        }
    }

    /// Current scanner state
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Process one raw source line
    pub fn feed(&mut self, line: &str) {
        self.file.summary.lines += 1;

        match self.classifier.classify(line, self.state) {
            LineKind::Open { kind, name } => self.open_block(kind, name),
            LineKind::Close => self.close_block(),
            LineKind::Field(field) => self.emit_field(field),
            LineKind::EnumValue(value) => self.emit_enum_value(value),
            LineKind::Rpc(rpc) => self.emit_rpc(rpc),
            LineKind::Skip | LineKind::NoMatch => {}
        }
    }

    /// Finish the scan and hand back the accumulated file
    ///
    /// A block still open at end of input is closed as if its `}` had been
    /// seen.
    pub fn finish(mut self) -> GoFile {
        if self.state != ScanState::None {
            warn!(
                block = %self.pending.name,
                state = ?self.state,
                "Input ended inside an unterminated block; closing it"
            );
            self.close_block();
        }
        self.file
    }

    fn open_block(&mut self, kind: BlockKind, name: String) {
        if self.state != ScanState::None {
            warn!(
                outer = %self.pending.name,
                inner = %name,
                "Nested blocks are not supported; outer block will not be resumed"
            );
        }

        let body = &mut self.file.body;
        match kind {
            BlockKind::Message => {
                debug!("Found message definition: {name}");
                body.push(format!("// {name} represents the {name} model from proto"));
                body.push(format!("type {name} struct {{"));
                self.file.summary.messages += 1;
            }
            BlockKind::Enum => {
                debug!("Found enum definition: {name}");
                body.push(format!("// {name} is an enumeration based on byte"));
                body.push(format!("type {name} byte"));
                body.push("const (".to_string());
                self.file.summary.enums += 1;
            }
            BlockKind::Service => {
                info!("Found service definition: {name}");
                body.push(format!(
                    "// {name} defines the interface for the REST client/server"
                ));
                body.push(format!("type {name} interface {{"));
                self.file.summary.services += 1;
            }
        }

        self.state = kind.state();
        self.pending = PendingBlock {
            name,
            first_value: kind == BlockKind::Enum,
        };
    }

    fn close_block(&mut self) {
        let delimiter = match self.state {
            ScanState::InEnum => ")",
            ScanState::InMessage | ScanState::InService => "}",
            ScanState::None => return,
        };
        self.file.body.push(delimiter.to_string());
        self.file.body.push(String::new());
        self.state = ScanState::None;
        self.pending = PendingBlock::default();
    }

    fn emit_field(&mut self, field: FieldDecl) {
        let mut go_type = TypeMapper::map_type(&field.proto_type).to_string();
        self.register_import(&go_type);

        if TypeMapper::is_uuid_hint(&field.comment) {
            debug!("Detected UUID field: {} in struct", field.name);
            go_type = GO_UUID.to_string();
            self.register_import(&go_type);
        }

        if field.repeated {
            go_type = format!("[]{go_type}");
        }

        let go_name = to_exported_name(&field.name);
        self.file.body.push(format!(
            "\t{go_name} {go_type} `json:\"{},omitempty\"`",
            field.name
        ));
        self.file.summary.fields += 1;
    }

    fn register_import(&mut self, go_type: &str) {
        if let Some(import) = TypeMapper::required_import(go_type) {
            self.file.imports.insert(import.to_string());
        }
    }

    fn emit_enum_value(&mut self, value: EnumValueDecl) {
        if self.pending.first_value {
            self.file
                .body
                .push(format!("\t{} {} = iota", value.name, self.pending.name));
            self.pending.first_value = false;
        } else {
            self.file.body.push(format!("\t{}", value.name));
        }
        self.file.summary.enum_values += 1;
    }

    fn emit_rpc(&mut self, rpc: RpcDecl) {
        debug!("Processing RPC: {}", rpc.method);
        self.file.body.push(format!(
            "\t{}(ctx context.Context, req *{}) (*{}, error)",
            rpc.method, rpc.request, rpc.response
        ));
        self.file.summary.rpcs += 1;
    }
}

/// Scan every line of `source` into a Go file for `package`
pub fn scan_source(classifier: &LineClassifier, source: &str, package: &str) -> GoFile {
    let mut scanner = BlockScanner::new(classifier, package);
    for line in source.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}
