//! Structured heterogeneous surfaces
//!
//! Settings on a structured surface carry typed values: scalars, nested
//! mappings, explicit nulls, and a placeholder for values the remote side
//! has not computed yet. The placeholder travels on the wire as the reserved
//! marker object `{"$unknown": true}`, survives decode/encode round trips
//! unchanged, and never concludes drift.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use drift_core::{DecodeIssue, InputRole, ReconcileValue, SettingsMap, SurfaceCodec};

use crate::flat::kind_of;

/// Reserved key marking the placeholder wire form
const UNKNOWN_KEY: &str = "$unknown";

/// Maximum nesting depth accepted while decoding
const MAX_VALUE_DEPTH: usize = 128;

/// A concrete leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// UTF-8 text
    Str(String),
    /// Any JSON number
    Num(Number),
    /// True or false
    Bool(bool),
}

/// One typed setting value on a structured surface
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// A concrete leaf
    Scalar(Scalar),
    /// A nested mapping, compared by deep structural equality
    Object(BTreeMap<String, SettingValue>),
    /// An explicit null; concrete, distinct from an absent key
    Null,
    /// Not yet determined; excluded from drift comparison, even against
    /// another placeholder
    Unknown,
}

impl SettingValue {
    /// Encode this value back to its wire form
    pub fn to_wire(&self) -> Value {
        match self {
            SettingValue::Scalar(Scalar::Str(text)) => Value::String(text.clone()),
            SettingValue::Scalar(Scalar::Num(number)) => Value::Number(number.clone()),
            SettingValue::Scalar(Scalar::Bool(flag)) => Value::Bool(*flag),
            SettingValue::Null => Value::Null,
            SettingValue::Unknown => {
                let mut marker = Map::new();
                marker.insert(UNKNOWN_KEY.to_string(), Value::Bool(true));
                Value::Object(marker)
            }
            SettingValue::Object(object) => Value::Object(
                object
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_wire()))
                    .collect(),
            ),
        }
    }

    /// Decode one wire value at `path`, collecting issues as they are found
    fn from_wire(
        input: InputRole,
        path: &str,
        wire: &Value,
        depth: usize,
        issues: &mut Vec<DecodeIssue>,
    ) -> Option<SettingValue> {
        if depth > MAX_VALUE_DEPTH {
            issues.push(DecodeIssue::at(input, path, "nesting deeper than supported"));
            return None;
        }

        match wire {
            Value::Null => Some(SettingValue::Null),
            Value::Bool(flag) => Some(SettingValue::Scalar(Scalar::Bool(*flag))),
            Value::Number(number) => Some(SettingValue::Scalar(Scalar::Num(number.clone()))),
            Value::String(text) => Some(SettingValue::Scalar(Scalar::Str(text.clone()))),
            Value::Array(_) => {
                issues.push(DecodeIssue::at(
                    input,
                    path,
                    "arrays are not a supported setting value",
                ));
                None
            }
            Value::Object(entries) => {
                if is_unknown_marker(entries) {
                    return Some(SettingValue::Unknown);
                }
                let mut object = BTreeMap::new();
                for (key, value) in entries {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };
                    if key == UNKNOWN_KEY {
                        issues.push(DecodeIssue::at(
                            input,
                            child_path,
                            "reserved marker key outside a placeholder object",
                        ));
                        continue;
                    }
                    if let Some(decoded) =
                        Self::from_wire(input, &child_path, value, depth + 1, issues)
                    {
                        object.insert(key.clone(), decoded);
                    }
                }
                Some(SettingValue::Object(object))
            }
        }
    }
}

impl ReconcileValue for SettingValue {
    fn is_concrete(&self) -> bool {
        match self {
            SettingValue::Scalar(_) | SettingValue::Null => true,
            SettingValue::Unknown => false,
            SettingValue::Object(object) => object.values().all(SettingValue::is_concrete),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(text: &str) -> Self {
        SettingValue::Scalar(Scalar::Str(text.to_string()))
    }
}

impl From<String> for SettingValue {
    fn from(text: String) -> Self {
        SettingValue::Scalar(Scalar::Str(text))
    }
}

impl From<bool> for SettingValue {
    fn from(flag: bool) -> Self {
        SettingValue::Scalar(Scalar::Bool(flag))
    }
}

impl From<i64> for SettingValue {
    fn from(number: i64) -> Self {
        SettingValue::Scalar(Scalar::Num(Number::from(number)))
    }
}

fn is_unknown_marker(entries: &Map<String, Value>) -> bool {
    entries.len() == 1 && entries.get(UNKNOWN_KEY) == Some(&Value::Bool(true))
}

/// Codec for heterogeneously typed, possibly nested surfaces
#[derive(Debug, Default)]
pub struct StructuredCodec;

impl StructuredCodec {
    pub fn new() -> Self {
        Self
    }
}

impl SurfaceCodec for StructuredCodec {
    type Value = SettingValue;

    fn decode(
        &self,
        input: InputRole,
        wire: &Value,
    ) -> Result<SettingsMap<SettingValue>, Vec<DecodeIssue>> {
        let Value::Object(entries) = wire else {
            return Err(vec![DecodeIssue::root(
                input,
                format!("expected a mapping, found {}", kind_of(wire)),
            )]);
        };

        let mut issues = Vec::new();
        let mut surface = SettingsMap::new();
        for (key, value) in entries {
            if key == UNKNOWN_KEY {
                issues.push(DecodeIssue::at(
                    input,
                    key.clone(),
                    "reserved marker key cannot name a setting",
                ));
                continue;
            }
            if let Some(decoded) = SettingValue::from_wire(input, key, value, 0, &mut issues) {
                surface.insert(key.clone(), decoded);
            }
        }

        if issues.is_empty() {
            Ok(surface)
        } else {
            Err(issues)
        }
    }

    fn encode(&self, surface: &SettingsMap<SettingValue>) -> Value {
        let mut entries = Map::new();
        for (key, value) in surface {
            entries.insert(key.clone(), value.to_wire());
        }
        Value::Object(entries)
    }
}
