//! The `AnyValue` tagged union and its format-agnostic serde glue.
//!
//! `Serialize` is a plain tag dispatch, so every serde format can encode an
//! `AnyValue`. `Deserialize` classifies through `deserialize_any` with the
//! strict rule set: integers must fit in `i64` and floats are rejected. That
//! matches the JSON sniff in [`crate::json`]; YAML hosts that want the
//! permissive content-probed behaviour go through [`crate::yaml`] instead.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::AnyValueError;
use crate::kind::Kind;

/// Children of a `StringMap` value. Ordered so that encoding is deterministic;
/// equality does not depend on insertion order.
pub type StringMap = BTreeMap<String, AnyValue>;

/// A schema-less value: exactly one of six shapes, recursively nestable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnyValue {
    #[default]
    Null,
    Int(i64),
    String(String),
    Bool(bool),
    StringMap(StringMap),
    Array(Vec<AnyValue>),
}

impl AnyValue {
    /// The active tag.
    pub fn kind(&self) -> Kind {
        match self {
            AnyValue::Null => Kind::Null,
            AnyValue::Int(_) => Kind::Int,
            AnyValue::String(_) => Kind::String,
            AnyValue::Bool(_) => Kind::Bool,
            AnyValue::StringMap(_) => Kind::StringMap,
            AnyValue::Array(_) => Kind::Array,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AnyValue::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AnyValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&StringMap> {
        match self {
            AnyValue::StringMap(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AnyValue]> {
        match self {
            AnyValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a key of a `StringMap`. Returns `None` for any other kind.
    pub fn get(&self, key: &str) -> Option<&AnyValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Look up an element of an `Array`. Returns `None` for any other kind.
    pub fn index(&self, i: usize) -> Option<&AnyValue> {
        self.as_array().and_then(|items| items.get(i))
    }
}

/// Renders the value as compact JSON.
impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl From<i64> for AnyValue {
    fn from(n: i64) -> Self {
        AnyValue::Int(n)
    }
}

impl From<i32> for AnyValue {
    fn from(n: i32) -> Self {
        AnyValue::Int(i64::from(n))
    }
}

impl From<bool> for AnyValue {
    fn from(b: bool) -> Self {
        AnyValue::Bool(b)
    }
}

impl From<&str> for AnyValue {
    fn from(s: &str) -> Self {
        AnyValue::String(s.to_string())
    }
}

impl From<String> for AnyValue {
    fn from(s: String) -> Self {
        AnyValue::String(s)
    }
}

impl From<StringMap> for AnyValue {
    fn from(map: StringMap) -> Self {
        AnyValue::StringMap(map)
    }
}

impl From<Vec<AnyValue>> for AnyValue {
    fn from(items: Vec<AnyValue>) -> Self {
        AnyValue::Array(items)
    }
}

impl<K: Into<String>, V: Into<AnyValue>> FromIterator<(K, V)> for AnyValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        AnyValue::StringMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Serialize for AnyValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            AnyValue::Null => serializer.serialize_unit(),
            AnyValue::Int(n) => serializer.serialize_i64(*n),
            AnyValue::String(s) => serializer.serialize_str(s),
            AnyValue::Bool(b) => serializer.serialize_bool(*b),
            AnyValue::StringMap(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            AnyValue::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(item)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for AnyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AnyValueVisitor)
    }
}

struct AnyValueVisitor;

impl<'de> Visitor<'de> for AnyValueVisitor {
    type Value = AnyValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("null, a 64-bit integer, a string, a boolean, a string-keyed map or an array")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(AnyValue::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(AnyValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        AnyValue::deserialize(deserializer)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
        Ok(AnyValue::Int(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i64::try_from(value)
            .map(AnyValue::Int)
            .map_err(|_| E::custom(AnyValueError::UnrecognizedShape(value.to_string())))
    }

    /// serde_json reports `-0` as `-0.0`; it is the integer zero. Any other
    /// float is rejected. `-0.0` itself is indistinguishable here and also
    /// decodes as zero.
    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if value == 0.0 && value.is_sign_negative() {
            return Ok(AnyValue::Int(0));
        }
        Err(E::custom(AnyValueError::UnrecognizedShape(value.to_string())))
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
        Ok(AnyValue::Bool(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
        Ok(AnyValue::String(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
        Ok(AnyValue::String(value))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(AnyValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = StringMap::new();
        while let Some((key, value)) = map.next_entry::<String, AnyValue>()? {
            entries.insert(key, value);
        }
        Ok(AnyValue::StringMap(entries))
    }
}
