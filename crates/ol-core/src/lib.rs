//! Declarative option schemas with fail-fast selection resolution.
//!
//! Functions that accumulate flag parameters end up with call sites like
//! `paginate(text, true, false, 42)` that cannot be read without the
//! callee's signature. This crate replaces positional flags with named
//! tokens checked against a compiled schema:
//!
//! - [`Spec`] entries declare categories, their options, and defaults
//! - [`Schema::compile`] checks the declaration once, up front
//! - [`Schema::resolve`] turns one call's selections into [`Settings`]
//!
//! A malformed declaration or selection fails fast with an error naming
//! the offender; nothing is silently corrected. Callers name only what
//! they change, and everything else keeps its declared default:
//!
//! ```
//! use ol_core::{Schema, Selection, Spec, Token, Value};
//!
//! const HISTORY: Token = Token::new("history");
//! const NOHISTORY: Token = Token::new("nohistory");
//! const PAGE_LEN: Token = Token::new("page_len");
//!
//! let schema = Schema::compile([
//!     Spec::choice(HISTORY, HISTORY, [NOHISTORY]),
//!     Spec::value(PAGE_LEN, 42),
//! ])?;
//!
//! let settings = schema.resolve([Selection::from(NOHISTORY)])?;
//! assert!(settings.is_active(NOHISTORY));
//! assert_eq!(settings.get(PAGE_LEN), Some(&Value::from(42)));
//!
//! let settings = schema.resolve([Selection::assign(PAGE_LEN, 55)])?;
//! assert!(settings.is_active(HISTORY));
//! assert_eq!(settings.get(PAGE_LEN), Some(&Value::from(55)));
//! # Ok::<(), ol_core::Error>(())
//! ```
//!
//! Schemas are immutable once compiled and safe to share across threads;
//! each [`Schema::resolve`] call works on its own state.

pub mod resolve;
pub mod schema;
pub mod settings;
pub mod spec;

pub use ol_common::{BoxError, Error, ErrorPhase, Result, Token, Value};
pub use resolve::Selection;
pub use schema::{Category, CategoryDefault, CategoryKind, Schema, ValidationHook};
pub use settings::Settings;
pub use spec::{ChoiceDefault, Spec};

/// The crate version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
