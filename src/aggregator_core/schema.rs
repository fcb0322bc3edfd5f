//! Translation event schema and per-record validation

use crate::error::SchemaViolation;
use serde_json::{Map, Value};

/// One undecoded input line: field name to JSON value.
pub type RawRecord = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Integer => "integer",
        }
    }

    /// Integers must be non-negative whole numbers.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Integer => value.is_u64(),
        }
    }
}

/// Expected fields, in the order missing-field and type checks report them.
pub const EXPECTED_FIELDS: [(&str, FieldKind); 8] = [
    ("timestamp", FieldKind::Text),
    ("translation_id", FieldKind::Text),
    ("source_language", FieldKind::Text),
    ("target_language", FieldKind::Text),
    ("client_name", FieldKind::Text),
    ("event_name", FieldKind::Text),
    ("nr_words", FieldKind::Integer),
    ("duration", FieldKind::Integer),
];

pub fn is_expected_field(name: &str) -> bool {
    EXPECTED_FIELDS.iter().any(|(field, _)| *field == name)
}

/// Name of the JSON kind of `value`, as reported in type mismatch errors.
pub fn json_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_u64() => "integer",
        Value::Number(n) if n.is_i64() => "negative integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check a raw record against [`EXPECTED_FIELDS`].
///
/// Unexpected keys are reported first, then missing keys, then type
/// mismatches, so the same bad record always yields the same error.
pub fn validate_record(record: &RawRecord) -> Result<(), SchemaViolation> {
    if let Some(key) = record.keys().find(|key| !is_expected_field(key)) {
        return Err(SchemaViolation::UnexpectedField(key.clone()));
    }

    if let Some((field, _)) = EXPECTED_FIELDS
        .iter()
        .find(|(field, _)| !record.contains_key(*field))
    {
        return Err(SchemaViolation::MissingField(field.to_string()));
    }

    for (field, kind) in EXPECTED_FIELDS.iter() {
        if let Some(value) = record.get(*field) {
            if !kind.matches(value) {
                return Err(SchemaViolation::WrongType {
                    field: field.to_string(),
                    received: json_kind_name(value),
                    expected: kind.as_str(),
                });
            }
        }
    }

    Ok(())
}
