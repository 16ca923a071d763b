use std::num::NonZero;

use thiserror::Error;

use crate::Value;

/// Configuration errors rejected at the call boundary.
///
/// Arithmetic on degenerate input never produces an error: each formula
/// substitutes its documented neutral value instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Window or smoothing length below one.
    #[error("invalid length: {0} (must be at least 1)")]
    InvalidLength(i64),

    /// Moving-average tag that names no known variant.
    #[error("unknown moving average: {0}")]
    UnknownMovingAverage(String),

    /// Overbought level not strictly above oversold level.
    #[error("invalid thresholds: overbought {overbought} must exceed oversold {oversold}")]
    InvalidThresholds { overbought: Value, oversold: Value },

    /// Any other parameter outside its valid range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl Error {
    #[must_use]
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Validates a length read from untyped configuration.
///
/// # Errors
///
/// Returns [`Error::InvalidLength`] when `value` is zero or negative.
///
/// # Example
///
/// ```
/// use quantedge_core::{Error, checked_length};
///
/// assert_eq!(checked_length(14).unwrap().get(), 14);
/// assert_eq!(checked_length(0), Err(Error::InvalidLength(0)));
/// ```
pub fn checked_length(value: i64) -> Result<NonZero<usize>> {
    usize::try_from(value)
        .ok()
        .and_then(NonZero::new)
        .ok_or_else(|| {
            tracing::warn!(length = value, "rejected window length");
            Error::InvalidLength(value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive() {
        assert_eq!(checked_length(1).map(NonZero::get), Ok(1));
        assert_eq!(checked_length(200).map(NonZero::get), Ok(200));
    }

    #[test]
    fn rejects_zero() {
        assert_eq!(checked_length(0), Err(Error::InvalidLength(0)));
    }

    #[test]
    fn rejects_negative() {
        assert_eq!(checked_length(-5), Err(Error::InvalidLength(-5)));
    }

    #[test]
    fn messages_name_the_value() {
        assert_eq!(
            Error::InvalidLength(-1).to_string(),
            "invalid length: -1 (must be at least 1)"
        );
        assert_eq!(
            Error::UnknownMovingAverage("foo".into()).to_string(),
            "unknown moving average: foo"
        );
    }
}
