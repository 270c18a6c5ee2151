//! Shared types for the option-list engine.
//!
//! This crate defines the vocabulary the compiler and resolver speak:
//! - [`Token`]: atomic identifiers for categories and options
//! - [`Value`]: what a category carries (nothing, a token, or data)
//! - [`Error`]: the single fail-fast error taxonomy

pub mod error;
pub mod token;
pub mod value;

pub use error::{BoxError, Error, ErrorPhase, Result};
pub use token::Token;
pub use value::Value;
