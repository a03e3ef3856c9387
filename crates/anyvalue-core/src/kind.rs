//! The closed set of shapes an `AnyValue` can take.

use std::fmt;
use std::str::FromStr;

use crate::error::AnyValueError;

/// Discriminant of an [`AnyValue`](crate::AnyValue).
///
/// The numeric codes (`Null = 0` through `Array = 5`) and the names returned by
/// [`Kind::name`] are stable and may be persisted or passed on a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Null = 0,
    Int = 1,
    String = 2,
    Bool = 3,
    StringMap = 4,
    Array = 5,
}

impl Kind {
    /// All kinds, in code order.
    pub const ALL: [Kind; 6] = [
        Kind::Null,
        Kind::Int,
        Kind::String,
        Kind::Bool,
        Kind::StringMap,
        Kind::Array,
    ];

    /// Stable lowercase name, e.g. `"stringMap"`.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Int => "int",
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::StringMap => "stringMap",
            Kind::Array => "array",
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// `true` for `Null`, `Int`, `String` and `Bool`.
    pub fn is_scalar(self) -> bool {
        !matches!(self, Kind::StringMap | Kind::Array)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Kind {
    type Error = AnyValueError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Kind::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| AnyValueError::InvalidTag(code.to_string()))
    }
}

/// Parses a kind name, ignoring ASCII case (`"StringMap"` and `"stringmap"` both work).
impl FromStr for Kind {
    type Err = AnyValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnyValueError::InvalidTag(s.to_string()))
    }
}
