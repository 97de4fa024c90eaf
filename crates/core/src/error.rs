//! Error types for parameter construction, access and rebinding
//!
//! All failures surface to the immediate caller. Nothing in dynscope retries
//! or swallows an error; `parameterize` only guarantees that restoration has
//! happened before an error is returned.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | `InvalidGuard` | `make_parameter_dyn`, `Guard::from_dyn` |
//! | `Validation` | any guard, at construction, `set`, or during rebinding |
//! | `InvalidArgument` | malformed bindings, `Parameter::invoke` with extra args |

use std::fmt;
use thiserror::Error;

/// Boxed source error carried by a [`ValidationError`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A guard rejected a candidate value or failed to transform it.
///
/// The message is owned entirely by the guard author.
#[derive(Debug)]
pub struct ValidationError {
    message: String,
    source: Option<BoxError>,
}

impl ValidationError {
    /// Create a validation error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a validation error wrapping an underlying cause
    ///
    /// Useful for guards that delegate to a parser:
    ///
    /// ```ignore
    /// let guard = |s: String| match s.parse::<u16>() {
    ///     Ok(_) => Ok(s),
    ///     Err(e) => Err(ValidationError::with_source("not a port", e)),
    /// };
    /// ```
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The guard's message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// All dynscope errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Guard candidate is not a unary callable over the parameter's type
    #[error("invalid guard: expected {expected}, got {actual}")]
    InvalidGuard {
        /// Guard types accepted for the parameter's value type
        expected: String,
        /// Type id of the supplied value, which matched none of them
        actual: String,
    },

    /// Guard rejected a value
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed input to `parameterize` or a parameter call
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Expected vs actual shape
        reason: String,
    },
}

/// Result type for dynscope operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an `InvalidArgument` error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Check if a guard rejected a value.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if the input to an operation was malformed.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }

    /// Check if a guard candidate was not callable.
    pub fn is_invalid_guard(&self) -> bool {
        matches!(self, Error::InvalidGuard { .. })
    }

    /// The guard's error, if this is a validation failure
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(e) => Some(e),
            _ => None,
        }
    }
}
