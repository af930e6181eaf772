//! Attribute model: typed key-value pairs attached to records and loggers

use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use std::fmt;

/// Key used when a flat argument list cannot be paired up.
pub const BAD_KEY: &str = "!BADKEY";

/// A dynamically typed attribute value
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// Nested attributes, rendered as an object in JSON output
    Group(Vec<Attr>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Group(attrs) => {
                f.write_str("[")?;
                for (i, attr) in attrs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", attr)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(x) if !x.is_finite() => {
                Err(S::Error::custom(format!("unsupported float value: {}", x)))
            }
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Group(attrs) => {
                let mut map = serializer.serialize_map(Some(attrs.len()))?;
                for attr in attrs {
                    map.serialize_entry(&attr.key, &attr.value)?;
                }
                map.end()
            }
        }
    }
}

macro_rules! impl_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )+
    };
}

impl_from!(Int as i64: i8, i16, i32, i64, isize);
impl_from!(Uint as u64: u8, u16, u32, u64, usize);
impl_from!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl From<Vec<Attr>> for Value {
    fn from(v: Vec<Attr>) -> Self {
        Value::Group(v)
    }
}

/// A single key-value pair
#[derive(Clone, Debug, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build a group attribute holding `attrs` under `key`
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self::new(key, Value::Group(attrs))
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Pair up a flat `key, value, key, value, ...` list.
///
/// A string in key position consumes the next element as its value. A
/// trailing string with no value, or any non-string in key position, is
/// kept under [`BAD_KEY`].
pub fn args_to_attrs(args: Vec<Value>) -> Vec<Attr> {
    let mut attrs = Vec::with_capacity(args.len() / 2 + 1);
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg {
            Value::String(key) => match iter.next() {
                Some(value) => attrs.push(Attr { key, value }),
                None => attrs.push(Attr::new(BAD_KEY, key)),
            },
            other => attrs.push(Attr {
                key: BAD_KEY.to_string(),
                value: other,
            }),
        }
    }

    attrs
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```
/// use structured_logger::{args, Value};
///
/// let args = args!["request done", "status", 200, "cached", false];
/// assert_eq!(args[2], Value::Int(200));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}
