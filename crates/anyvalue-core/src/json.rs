//! JSON codec for `AnyValue`: syntax sniff on decode, tag dispatch on encode.
//!
//! JSON is syntax-typed, so the kind of a value is visible in its first byte
//! or, for the bare literals, in its full text. The decoder classifies the raw
//! span *before* any semantic parse, in this order:
//!
//! 1. `"` → string
//! 2. `{` → string map (each entry's raw span is sniffed again)
//! 3. `[` → array (each element's raw span is sniffed again)
//! 4. `true` / `false` → bool
//! 5. `null` → null
//! 6. a base-10 integer that fits in `i64` → int
//!
//! Anything else, floats included, is rejected with
//! [`AnyValueError::UnrecognizedShape`].
//!
//! # Embedding in a host struct
//!
//! ```
//! use anyvalue_core::{AnyValue, Kind};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct KvPair {
//!     name: String,
//!     #[serde(with = "anyvalue_core::json")]
//!     value: AnyValue,
//! }
//!
//! let kv: KvPair = serde_json::from_str(r#"{"name":"n","value":"1"}"#).unwrap();
//! assert_eq!(kv.value.kind(), Kind::String);
//! ```

use std::collections::BTreeMap;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::value::RawValue;

use crate::error::{AnyValueError, Result};
use crate::kind::Kind;
use crate::value::{AnyValue, StringMap};

/// Decode one JSON value from its raw span.
///
/// Leading and trailing JSON whitespace is ignored. Sub-values of maps and
/// arrays are classified independently, so `["1", 1]` yields a string and an int.
pub fn decode(raw: &[u8]) -> Result<AnyValue> {
    let raw = trim_whitespace(raw);
    let kind = sniff(raw)?;
    tracing::trace!(%kind, len = raw.len(), "sniffed JSON value");

    match kind {
        Kind::Null => Ok(AnyValue::Null),
        Kind::Bool => Ok(AnyValue::Bool(raw == b"true")),
        Kind::Int => parse_int(raw)
            .map(AnyValue::Int)
            .ok_or_else(|| unrecognized(raw)),
        Kind::String => Ok(AnyValue::String(serde_json::from_slice(raw)?)),
        Kind::StringMap => {
            let entries: BTreeMap<String, &RawValue> = serde_json::from_slice(raw)?;
            let mut map = StringMap::new();
            for (key, child) in entries {
                map.insert(key, decode(child.get().as_bytes())?);
            }
            Ok(AnyValue::StringMap(map))
        }
        Kind::Array => {
            let elements: Vec<&RawValue> = serde_json::from_slice(raw)?;
            let items = elements
                .into_iter()
                .map(|child| decode(child.get().as_bytes()))
                .collect::<Result<Vec<_>>>()?;
            Ok(AnyValue::Array(items))
        }
    }
}

/// Decode one JSON value from text. See [`decode`].
pub fn decode_str(raw: &str) -> Result<AnyValue> {
    decode(raw.as_bytes())
}

/// Classify a raw JSON span without parsing its payload.
///
/// Only the leading byte is inspected for strings, maps and arrays; those are
/// validated later by the codec. Literals and integers must match in full.
pub fn sniff(raw: &[u8]) -> Result<Kind> {
    match raw.first() {
        Some(b'"') => Ok(Kind::String),
        Some(b'{') => Ok(Kind::StringMap),
        Some(b'[') => Ok(Kind::Array),
        Some(_) if raw == b"true" || raw == b"false" => Ok(Kind::Bool),
        Some(_) if raw == b"null" => Ok(Kind::Null),
        Some(_) if parse_int(raw).is_some() => Ok(Kind::Int),
        _ => {
            tracing::debug!(raw = %String::from_utf8_lossy(raw), "unrecognized JSON value syntax");
            Err(unrecognized(raw))
        }
    }
}

/// Encode as compact JSON bytes.
pub fn encode(value: &AnyValue) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Encode as compact JSON text.
pub fn encode_string(value: &AnyValue) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Encode as indented JSON text.
pub fn encode_pretty(value: &AnyValue) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// `deserialize_with` adapter: captures the field's raw JSON span and sniffs it.
///
/// Only works with `serde_json` deserializers.
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<AnyValue, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    decode_str(raw.get()).map_err(de::Error::custom)
}

/// `serialize_with` adapter, the counterpart of [`deserialize`].
pub fn serialize<S>(value: &AnyValue, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.serialize(serializer)
}

/// Parse a JSON integer literal (`-?(0|[1-9][0-9]*)`) into an `i64`.
/// Returns `None` for other number forms and for values out of range.
fn parse_int(raw: &[u8]) -> Option<i64> {
    let digits = raw.strip_prefix(b"-").unwrap_or(raw);
    let well_formed = match digits {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        _ => digits.iter().all(u8::is_ascii_digit),
    };
    if !well_formed {
        return None;
    }
    std::str::from_utf8(raw).ok()?.parse().ok()
}

fn trim_whitespace(raw: &[u8]) -> &[u8] {
    let is_ws = |b: &u8| matches!(b, b' ' | b'\t' | b'\n' | b'\r');
    let start = raw.iter().position(|b| !is_ws(b)).unwrap_or(raw.len());
    let end = raw.iter().rposition(|b| !is_ws(b)).map_or(start, |i| i + 1);
    &raw[start..end]
}

fn unrecognized(raw: &[u8]) -> AnyValueError {
    AnyValueError::UnrecognizedShape(String::from_utf8_lossy(raw).into_owned())
}
