//! Flat string-valued surfaces

use serde_json::{Map, Value};

use drift_core::{DecodeIssue, InputRole, SettingsMap, SurfaceCodec};

/// Codec for surfaces where every setting value is a plain string
///
/// Decoding is strict: numbers, booleans, and nulls are reported as issues
/// rather than coerced to text.
#[derive(Debug, Default)]
pub struct FlatCodec;

impl FlatCodec {
    pub fn new() -> Self {
        Self
    }
}

impl SurfaceCodec for FlatCodec {
    type Value = String;

    fn decode(
        &self,
        input: InputRole,
        wire: &Value,
    ) -> Result<SettingsMap<String>, Vec<DecodeIssue>> {
        let Value::Object(entries) = wire else {
            return Err(vec![DecodeIssue::root(
                input,
                format!("expected a string mapping, found {}", kind_of(wire)),
            )]);
        };

        let mut issues = Vec::new();
        let mut surface = SettingsMap::new();
        for (key, value) in entries {
            match value {
                Value::String(text) => {
                    surface.insert(key.clone(), text.clone());
                }
                other => issues.push(DecodeIssue::at(
                    input,
                    key.clone(),
                    format!("expected a string, found {}", kind_of(other)),
                )),
            }
        }

        if issues.is_empty() {
            Ok(surface)
        } else {
            Err(issues)
        }
    }

    fn encode(&self, surface: &SettingsMap<String>) -> Value {
        let mut entries = Map::new();
        for (key, value) in surface {
            entries.insert(key.clone(), Value::String(value.clone()));
        }
        Value::Object(entries)
    }
}

/// Human-readable name of a JSON value's type, for issue messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
