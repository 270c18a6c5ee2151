//! Category values: nothing, an option token, or arbitrary caller data.

use std::fmt;

use serde::Serialize;

use crate::token::Token;

/// The value a category carries, in a schema default or a resolved setting.
///
/// `Token` is reserved for enumerated option selections; every plain Rust
/// value converts into `Data` instead, strings included. The distinction
/// is what lets the resolver cross-check enumerated categories without
/// guessing at the caller's intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// No value: an unset category, or an explicit clear.
    Null,
    /// An enumerated option token.
    Token(Token),
    /// Arbitrary data, for value categories.
    Data(serde_json::Value),
}

impl Value {
    /// True for everything except `Null` and boolean `false` data.
    ///
    /// This is the notion of "set" the mandatory sweep uses: a category
    /// holding `false` counts as missing, same as one holding nothing.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Data(serde_json::Value::Bool(false)))
    }

    /// True if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The token, if this is an enumerated option.
    pub fn as_token(&self) -> Option<Token> {
        match self {
            Value::Token(token) => Some(*token),
            _ => None,
        }
    }

    /// The underlying data, if this is a data value.
    pub fn as_data(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Short name for the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Token(_) => "option token",
            Value::Data(_) => "data",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Token(token) => write!(f, "{token}"),
            Value::Data(data) => write!(f, "{data}"),
        }
    }
}

impl From<Token> for Value {
    fn from(token: Token) -> Self {
        Value::Token(token)
    }
}

impl From<serde_json::Value> for Value {
    fn from(data: serde_json::Value) -> Self {
        Value::Data(data)
    }
}

impl From<bool> for Value {
    fn from(data: bool) -> Self {
        Value::Data(serde_json::Value::Bool(data))
    }
}

impl From<&str> for Value {
    fn from(data: &str) -> Self {
        Value::Data(serde_json::Value::String(data.to_owned()))
    }
}

impl From<String> for Value {
    fn from(data: String) -> Self {
        Value::Data(serde_json::Value::String(data))
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(data: $ty) -> Self {
                    Value::Data(serde_json::Value::from(data))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);
