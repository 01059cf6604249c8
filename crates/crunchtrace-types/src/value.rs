use serde::{Deserialize, Serialize};
use std::fmt;

/// A runtime value captured from the traced program.
///
/// The host engine maps its own values onto these shapes. Anything it cannot
/// represent structurally ends up as [`CapturedValue::Opaque`] carrying the
/// type name and a printable representation, so capture never fails on an
/// unknown type.
///
/// Kept as a plain externally-tagged enum: the binary recording format is not
/// self-describing and cannot decode internally-tagged or untagged layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapturedValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<CapturedValue>),
    Tuple(Vec<CapturedValue>),
    /// Key/value pairs in the host's iteration order.
    Map(Vec<(CapturedValue, CapturedValue)>),
    /// An instance whose attributes were captured one level deep.
    Object {
        type_name: String,
        fields: Vec<(String, CapturedValue)>,
    },
    Opaque {
        type_name: String,
        repr: String,
    },
}

impl CapturedValue {
    pub fn opaque(type_name: impl Into<String>, repr: impl Into<String>) -> Self {
        CapturedValue::Opaque {
            type_name: type_name.into(),
            repr: repr.into(),
        }
    }

    /// Short type label used by listings.
    pub fn type_name(&self) -> &str {
        match self {
            CapturedValue::None => "none",
            CapturedValue::Bool(_) => "bool",
            CapturedValue::Int(_) => "int",
            CapturedValue::Float(_) => "float",
            CapturedValue::Str(_) => "str",
            CapturedValue::Bytes(_) => "bytes",
            CapturedValue::List(_) => "list",
            CapturedValue::Tuple(_) => "tuple",
            CapturedValue::Map(_) => "map",
            CapturedValue::Object { type_name, .. } => type_name,
            CapturedValue::Opaque { type_name, .. } => type_name,
        }
    }
}

impl From<bool> for CapturedValue {
    fn from(value: bool) -> Self {
        CapturedValue::Bool(value)
    }
}

impl From<i64> for CapturedValue {
    fn from(value: i64) -> Self {
        CapturedValue::Int(value)
    }
}

impl From<i32> for CapturedValue {
    fn from(value: i32) -> Self {
        CapturedValue::Int(value as i64)
    }
}

impl From<f64> for CapturedValue {
    fn from(value: f64) -> Self {
        CapturedValue::Float(value)
    }
}

impl From<&str> for CapturedValue {
    fn from(value: &str) -> Self {
        CapturedValue::Str(value.to_string())
    }
}

impl From<String> for CapturedValue {
    fn from(value: String) -> Self {
        CapturedValue::Str(value)
    }
}

impl<T: Into<CapturedValue>> From<Option<T>> for CapturedValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CapturedValue::None)
    }
}

impl<T: Into<CapturedValue>> From<Vec<T>> for CapturedValue {
    fn from(value: Vec<T>) -> Self {
        CapturedValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for CapturedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapturedValue::None => write!(f, "None"),
            CapturedValue::Bool(v) => write!(f, "{}", if *v { "True" } else { "False" }),
            CapturedValue::Int(v) => write!(f, "{}", v),
            CapturedValue::Float(v) => write!(f, "{}", v),
            CapturedValue::Str(v) => write!(f, "{:?}", v),
            CapturedValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            CapturedValue::List(items) => {
                write!(f, "[")?;
                write_joined(f, items)?;
                write!(f, "]")
            }
            CapturedValue::Tuple(items) => {
                write!(f, "(")?;
                write_joined(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            CapturedValue::Map(entries) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            CapturedValue::Object { type_name, fields } => {
                write!(f, "{}(", type_name)?;
                for (idx, (name, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", name, value)?;
                }
                write!(f, ")")
            }
            CapturedValue::Opaque { repr, .. } => write!(f, "{}", repr),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[CapturedValue]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
