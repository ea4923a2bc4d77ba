//! Detailed rendering of values for hashing.
//!
//! Two values render identically only if they are structurally equal: every
//! node is tagged with its kind, strings are quoted and escaped, floats are
//! written as their IEEE-754 bits and object keys are sorted.

use kit::types::types::{ObjectDefinition, ObjectProperty, Type, Value};

pub fn render_value(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

pub fn render_type(typing: &Type) -> String {
    let mut out = String::new();
    write_type(&mut out, typing);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(value) => out.push_str(&format!("bool({})", value)),
        Value::Integer(value) => out.push_str(&format!("integer({})", value)),
        Value::Float(value) => out.push_str(&format!("float({:016x})", value.to_bits())),
        Value::String(value) => {
            out.push_str("string(");
            write_quoted(out, value);
            out.push(')');
        }
        Value::Buffer(bytes) => out.push_str(&format!("buffer(0x{})", kit::hex::encode(bytes))),
        Value::Array(values) => {
            out.push_str("array[");
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, value);
            }
            out.push(']');
        }
        Value::Object(entries) => {
            let mut keys = entries.keys().collect::<Vec<_>>();
            keys.sort();
            out.push_str("object{");
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_quoted(out, key);
                out.push_str(": ");
                if let Some(value) = entries.get(key) {
                    write_value(out, value);
                }
            }
            out.push('}');
        }
        Value::Provider(data) => {
            out.push_str("provider(");
            write_quoted(out, &data.id);
            out.push_str(&format!(", 0x{})", kit::hex::encode(&data.bytes)));
        }
        Value::Unknown(typing) => {
            out.push_str("unknown(");
            write_type(out, typing);
            out.push(')');
        }
    }
}

fn write_type(out: &mut String, typing: &Type) {
    match typing {
        Type::Bool => out.push_str("bool"),
        Type::Null => out.push_str("null"),
        Type::Integer => out.push_str("integer"),
        Type::Float => out.push_str("float"),
        Type::String => out.push_str("string"),
        Type::Buffer => out.push_str("buffer"),
        Type::Dynamic => out.push_str("dynamic"),
        Type::Provider(id) => {
            out.push_str("provider(");
            write_quoted(out, id);
            out.push(')');
        }
        Type::Array(inner) => {
            out.push_str("array[");
            write_type(out, inner);
            out.push(']');
        }
        Type::Object(definition) => {
            out.push_str("object");
            write_object_definition(out, definition);
        }
        Type::Map(definition) => {
            out.push_str("map");
            write_object_definition(out, definition);
        }
    }
}

// Documented properties of an arbitrary definition do not constrain values.
fn write_object_definition(out: &mut String, definition: &ObjectDefinition) {
    match definition {
        ObjectDefinition::Arbitrary(_) => out.push_str("{*}"),
        ObjectDefinition::Strict(props) => {
            let mut props = props.iter().collect::<Vec<&ObjectProperty>>();
            props.sort_by(|a, b| a.name.cmp(&b.name));
            out.push('{');
            for (i, prop) in props.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_quoted(out, &prop.name);
                out.push_str(if prop.optional { "?: " } else { ": " });
                write_type(out, &prop.typing);
            }
            out.push('}');
        }
    }
}

fn write_quoted(out: &mut String, source: &str) {
    out.push('"');
    out.push_str(&source.escape_default().to_string());
    out.push('"');
}
