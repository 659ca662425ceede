//! Type mapping from protobuf scalar types to Go types
//!
//! Maps proto scalar and well-known type names to the Go type used in the
//! generated struct fields.

/// Go type emitted for `google.protobuf.Timestamp`
pub const GO_TIME: &str = "time.Time";

/// Go type emitted for fields hinted as UUIDs
pub const GO_UUID: &str = "uuid.UUID";

/// Import required by [`GO_TIME`]
pub const TIME_IMPORT: &str = "\"time\"";

/// Import required by [`GO_UUID`]
pub const UUID_IMPORT: &str = "\"github.com/google/uuid\"";

/// Maps proto type names to Go type names
pub struct TypeMapper;

impl TypeMapper {
    /// Map a proto type name to a Go type
    ///
    /// Names missing from the scalar table are returned unchanged, so
    /// references to other messages and enums compose as-is.
    ///
    /// # Examples
    /// ```
    /// use protogo_parser::TypeMapper;
    ///
    /// assert_eq!(TypeMapper::map_type("double"), "float64");
    /// assert_eq!(TypeMapper::map_type("bytes"), "[]byte");
    /// assert_eq!(TypeMapper::map_type("MyMessage"), "MyMessage");
    /// ```
    pub fn map_type(proto_type: &str) -> &str {
        match proto_type {
            "double" => "float64",
            "float" => "float32",
            "int32" | "sint32" | "sfixed32" => "int32",
            "int64" | "sint64" | "sfixed64" => "int64",
            "uint32" | "fixed32" => "uint32",
            "uint64" | "fixed64" => "uint64",
            "bool" => "bool",
            "string" => "string",
            "bytes" => "[]byte",
            // Well-known types
            "google.protobuf.Timestamp" | "Timestamp" => GO_TIME,
            other => other,
        }
    }

    /// Import path a mapped Go type depends on, if any
    pub fn required_import(go_type: &str) -> Option<&'static str> {
        match go_type {
            GO_TIME => Some(TIME_IMPORT),
            GO_UUID => Some(UUID_IMPORT),
            _ => None,
        }
    }

    /// Check if a trailing comment marks the field as a UUID
    pub fn is_uuid_hint(comment: &str) -> bool {
        comment.to_uppercase().contains("UUID")
    }
}
