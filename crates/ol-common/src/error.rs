//! Error types for option schemas and selections.
//!
//! Every failure is fail-fast and terminal for the call that produced it:
//! - Specification errors abort schema compilation
//! - Selection errors abort resolution of one call's selections
//! - Validation errors carry a hook's rejection through unchanged
//!
//! Messages name the offending category, option, or value kind so the
//! call site can be fixed without re-running under a debugger.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for schema and selection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error type returned by caller-supplied validation hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The phase that rejected its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPhase {
    /// Schema compilation rejected a specification entry.
    Specification,
    /// Resolution rejected a selection entry.
    Selection,
    /// A validation hook rejected the resolved settings.
    Validation,
}

impl std::fmt::Display for ErrorPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPhase::Specification => write!(f, "specification"),
            ErrorPhase::Selection => write!(f, "selection"),
            ErrorPhase::Validation => write!(f, "validation"),
        }
    }
}

/// Unified error type for option schemas and selections.
///
/// Compilation and resolution failures are both programming errors at the
/// call site rather than recoverable runtime conditions, so they share one
/// type; [`Error::phase`] tells them apart when it matters.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid option specification: {0}")]
    InvalidSpecification(String),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// An error raised by a validation hook, passed through unchanged.
    #[error("{0}")]
    Validation(#[from] BoxError),
}

impl Error {
    /// Returns the phase that produced this error.
    pub fn phase(&self) -> ErrorPhase {
        match self {
            Error::InvalidSpecification(_) => ErrorPhase::Specification,
            Error::InvalidSelection(_) => ErrorPhase::Selection,
            Error::Validation(_) => ErrorPhase::Validation,
        }
    }
}
