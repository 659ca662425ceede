//! Template loading and management

use protogo_common::{GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Name of the Go source file template
pub const GO_FILE_TEMPLATE: &str = "file.go";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    // Generated Go text must never be HTML-escaped
    tera.autoescape_on(vec![]);

    tera.register_filter("lines", lines_filter);

    tera.add_raw_template(GO_FILE_TEMPLATE, include_str!("../templates/file.go.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load {GO_FILE_TEMPLATE} template: {e}"))
        })?;

    Ok(tera)
}

/// Filter to join emitted body lines with newlines
fn lines_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let lines = value
        .as_array()
        .ok_or_else(|| tera::Error::msg("lines filter expects an array"))?;

    let joined = lines
        .iter()
        .map(|line| {
            line.as_str()
                .ok_or_else(|| tera::Error::msg("lines filter expects an array of strings"))
        })
        .collect::<tera::Result<Vec<&str>>>()?
        .join("\n");

    Ok(Value::String(joined))
}
