//! # anyvalue-core
//!
//! A schema-less dynamic value, [`AnyValue`], that round-trips through JSON and YAML.
//!
//! An `AnyValue` is exactly one of six shapes: null, 64-bit integer, string,
//! boolean, string-keyed map, or array. Maps and arrays nest further
//! `AnyValue`s, each with its own kind. The interesting part is recovering the
//! kind without a schema, which the two formats force to happen differently:
//!
//! - **JSON** is syntax-typed. [`json::decode`] sniffs the raw text: a leading
//!   `"`, `{` or `[`, then the exact literals `true`/`false`/`null`, then an
//!   `i64`. Anything else (including `1.5`) is an error.
//! - **YAML** is content-probed. The parser has already typed every node, so
//!   [`yaml::from_node`] offers the node to each shape in a fixed priority
//!   order. A quoted `"1"` stays a string; an unquoted `1` is an int.
//!
//! Encoding is a tag dispatch in both cases.
//!
//! ## Quick start
//!
//! ```rust
//! use anyvalue_core::{json, yaml, AnyValue, Kind};
//!
//! let value = json::decode_str(r#"["1", true, {"key1": "1", "key2": 2}]"#).unwrap();
//! assert_eq!(value.kind(), Kind::Array);
//! assert_eq!(value.index(2).and_then(|m| m.get("key2")), Some(&AnyValue::Int(2)));
//!
//! // Same value through YAML and back
//! let text = yaml::encode(&value).unwrap();
//! assert_eq!(yaml::decode(&text).unwrap(), value);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the `AnyValue` enum, accessors, format-agnostic serde impls
//! - [`kind`]: the `Kind` tag
//! - [`json`]: syntax-sniff decoder, encoder, field adapters
//! - [`yaml`]: trial decoder, encoder, field adapters
//! - [`error`]: error types

pub mod error;
pub mod json;
pub mod kind;
pub mod value;
pub mod yaml;

pub use error::{AnyValueError, Result};
pub use kind::Kind;
pub use value::{AnyValue, StringMap};
