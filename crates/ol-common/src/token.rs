//! Atomic identifier tokens for categories and options.

use std::fmt;

use serde::Serialize;

/// An atomic identifier naming a category or an option.
///
/// Tokens are backed by `&'static str`, so the natural way to use them is
/// as `const` items next to the schema they belong to. Equality is by
/// name: two tokens written in different places compare equal when their
/// names match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Token(&'static str);

impl Token {
    /// Creates a token from a static name.
    pub const fn new(name: &'static str) -> Self {
        Token(name)
    }

    /// The token's name.
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<&'static str> for Token {
    fn from(name: &'static str) -> Self {
        Token(name)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.0
    }
}
