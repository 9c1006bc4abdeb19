//! Error types for contract violations.
//!
//! Calling `unwrap` on the wrong variant is a programmer error, so the
//! panicking accessors of [`Outcome`](super::Outcome) and
//! [`Maybe`](super::Maybe) abort the current thread. The `try_unwrap`
//! family reports the same violation as a value instead, carrying the
//! payload of the variant that was actually present.

use thiserror::Error;

/// Represents an `unwrap`-family call on the wrong variant.
///
/// The mismatched payload is kept so callers can still recover it.
///
/// # Examples
///
/// ```rust
/// use railway::control::{Outcome, UnwrapError};
///
/// let outcome: Outcome<i32, &str> = Outcome::Err("boom");
/// let error: UnwrapError<&str> = outcome.try_unwrap().unwrap_err();
///
/// assert_eq!(error.value, "boom");
/// assert_eq!(error.to_string(), "called unwrap on Err");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UnwrapError<V> {
    /// Description of the violated expectation.
    pub message: String,
    /// The payload of the variant that was present instead.
    pub value: V,
}

impl<V> UnwrapError<V> {
    /// Creates a new `UnwrapError` from a message and the mismatched payload.
    pub fn new(message: impl Into<String>, value: V) -> Self {
        Self {
            message: message.into(),
            value,
        }
    }

    /// Consumes the error and returns the mismatched payload.
    pub fn into_value(self) -> V {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_error_display() {
        let error = UnwrapError::new("called unwrap on Err", "boom");
        assert_eq!(format!("{error}"), "called unwrap on Err");
    }

    #[test]
    fn test_unwrap_error_keeps_value() {
        let error = UnwrapError::new("called unwrap_err on Ok", 42);
        assert_eq!(error.value, 42);
        assert_eq!(error.into_value(), 42);
    }

    #[test]
    fn test_unwrap_error_is_std_error() {
        fn assert_error<T: std::error::Error>(_: &T) {}
        let error = UnwrapError::new("called unwrap on Nothing", ());
        assert_error(&error);
    }
}
