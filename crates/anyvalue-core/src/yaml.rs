//! YAML codec for `AnyValue`: trial decode on the parsed node, tag dispatch on encode.
//!
//! YAML is content-probed: by the time a field is decoded the parser has
//! already typed each node, so `"1"` arrives as a string and `1` as an
//! integer. There are no raw bytes to sniff. Instead the node is offered to
//! each shape in a fixed priority order and the first shape that accepts it
//! wins:
//!
//! | order | shape      | accepts                                              |
//! |-------|------------|------------------------------------------------------|
//! | 1     | null       | `~`, `null`, an empty node                           |
//! | 2     | int        | an integer node that fits in `i64`                   |
//! | 3     | bool       | a boolean node                                       |
//! | 4     | string     | any remaining scalar, as text (`1.5` → `"1.5"`)      |
//! | 5     | string map | a mapping; each value is tried again                 |
//! | 6     | array      | a sequence; each element is tried again              |
//!
//! Scalars come before aggregates, and int/bool before string, because the
//! string shape is permissive and would otherwise swallow `1` and `true`.
//! Tags (`!foo bar`) are looked through.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_yaml::Value;

use crate::error::{AnyValueError, Result};
use crate::kind::Kind;
use crate::value::{AnyValue, StringMap};

/// Shapes in the order they are tried.
pub const TRIAL_ORDER: [Kind; 6] = [
    Kind::Null,
    Kind::Int,
    Kind::Bool,
    Kind::String,
    Kind::StringMap,
    Kind::Array,
];

/// Parse a YAML document and decode its root node.
///
/// Merge keys (`<<: *anchor`) are resolved before classification.
pub fn decode(text: &str) -> Result<AnyValue> {
    let mut node: Value = serde_yaml::from_str(text)?;
    node.apply_merge()?;
    from_node(&node)
}

/// Decode an already-parsed YAML node.
pub fn from_node(node: &Value) -> Result<AnyValue> {
    let node = untag(node);
    let kind = classify(node)?;
    tracing::trace!(%kind, "classified YAML node");

    match kind {
        Kind::Null => Ok(AnyValue::Null),
        Kind::Int => node
            .as_i64()
            .map(AnyValue::Int)
            .ok_or_else(|| unrecognized(node)),
        Kind::Bool => node
            .as_bool()
            .map(AnyValue::Bool)
            .ok_or_else(|| unrecognized(node)),
        Kind::String => scalar_text(node)
            .map(AnyValue::String)
            .ok_or_else(|| unrecognized(node)),
        Kind::StringMap => {
            let mapping = node.as_mapping().ok_or_else(|| unrecognized(node))?;
            let mut map = StringMap::new();
            for (key, child) in mapping {
                let name = map_key(key)?;
                if map.contains_key(&name) {
                    tracing::debug!(key = %name, "YAML keys collide after coercion to text");
                    return Err(AnyValueError::UnrecognizedShape(format!(
                        "duplicate key after coercion: {name}"
                    )));
                }
                map.insert(name, from_node(child)?);
            }
            Ok(AnyValue::StringMap(map))
        }
        Kind::Array => {
            let sequence = node.as_sequence().ok_or_else(|| unrecognized(node))?;
            let items = sequence.iter().map(from_node).collect::<Result<Vec<_>>>()?;
            Ok(AnyValue::Array(items))
        }
    }
}

/// Find the first shape in [`TRIAL_ORDER`] that accepts the node.
pub fn classify(node: &Value) -> Result<Kind> {
    let node = untag(node);
    TRIAL_ORDER
        .into_iter()
        .find(|&kind| accepts(node, kind))
        .ok_or_else(|| {
            tracing::debug!(node = ?node, "no shape accepted YAML node");
            unrecognized(node)
        })
}

/// Build the native YAML node for a value.
pub fn to_node(value: &AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Int(n) => Value::Number((*n).into()),
        AnyValue::String(s) => Value::String(s.clone()),
        AnyValue::Bool(b) => Value::Bool(*b),
        AnyValue::StringMap(map) => Value::Mapping(
            map.iter()
                .map(|(key, child)| (Value::String(key.clone()), to_node(child)))
                .collect(),
        ),
        AnyValue::Array(items) => Value::Sequence(items.iter().map(to_node).collect()),
    }
}

/// Encode as a YAML document. Strings that would read back as another kind
/// (`'1'`, `'true'`, `''`) are quoted by the emitter.
pub fn encode(value: &AnyValue) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}

/// `deserialize_with` adapter: captures the field's parsed node and runs the
/// trial decode on it.
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<AnyValue, D::Error>
where
    D: Deserializer<'de>,
{
    let mut node = Value::deserialize(deserializer)?;
    node.apply_merge().map_err(de::Error::custom)?;
    from_node(&node).map_err(de::Error::custom)
}

/// `serialize_with` adapter, the counterpart of [`deserialize`].
pub fn serialize<S>(value: &AnyValue, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.serialize(serializer)
}

fn accepts(node: &Value, kind: Kind) -> bool {
    match kind {
        Kind::Null => node.is_null(),
        Kind::Int => node.as_i64().is_some(),
        Kind::Bool => node.is_bool(),
        Kind::String => scalar_text(node).is_some(),
        Kind::StringMap => node.is_mapping(),
        Kind::Array => node.is_sequence(),
    }
}

/// Text of a non-null scalar node: the string itself, or the canonical
/// rendering of a number or boolean.
fn scalar_text(node: &Value) -> Option<String> {
    match untag(node) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

fn map_key(key: &Value) -> Result<String> {
    scalar_text(key).ok_or_else(|| unrecognized(key))
}

fn untag(mut node: &Value) -> &Value {
    while let Value::Tagged(tagged) = node {
        node = &tagged.value;
    }
    node
}

fn unrecognized(node: &Value) -> AnyValueError {
    let rendered = serde_yaml::to_string(node).unwrap_or_else(|_| format!("{node:?}"));
    AnyValueError::UnrecognizedShape(rendered.trim_end().to_string())
}
