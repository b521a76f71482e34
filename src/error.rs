//! Error kinds raised by the sharing core
//!
//! Every failure is local and deterministic: nothing is retried and no
//! caller-visible state is modified when an error is returned. Failures raised
//! while processing one unit of a byte-wise secret are wrapped in
//! [`SharingError::AtUnit`] so the caller learns which position failed;
//! [`SharingError::root`] recovers the underlying kind.

use thiserror::Error;

/// Errors produced by field arithmetic, share generation, reconstruction and
/// share persistence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SharingError {
    /// Threshold or share count violate `1 <= k <= n < P` or exceed the 1024 cap, or the modulus is unusable
    #[error("Invalid threshold scheme: {reason}")]
    InvalidScheme { reason: String },

    /// A secret unit does not fit in the field
    #[error("Secret value {value} is outside the field [0, {modulus})")]
    InvalidSecret { value: u64, modulus: u64 },

    /// Share x coordinate 0 is reserved for the secret itself
    #[error("Share index must be at least 1 (got {value})")]
    InvalidShareIndex { value: u64 },

    #[error("Insufficient shares: need at least {required}, but only {provided} provided")]
    InsufficientShares { required: usize, provided: usize },

    /// Modular inverse undefined: duplicate x coordinates or a non-prime modulus
    #[error("No modular inverse exists for {value} modulo {modulus}")]
    NoInverse { value: u64, modulus: u64 },

    /// Malformed persisted share text; `line` is 1-based
    #[error("Malformed share record at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Image dimensions require {expected} pixels, but {actual} were supplied")]
    DimensionMismatch { expected: u64, actual: u64 },

    /// Reconstructed data cannot be a valid byte, text or pixel value
    #[error("Corrupt share data: {reason}")]
    CorruptShare { reason: String },

    #[error("Operation cancelled after {completed} of {total} units")]
    Cancelled { completed: usize, total: usize },

    /// Failure while sharing or reconstructing the unit at `unit`
    #[error("Failed at unit {unit}")]
    AtUnit {
        unit: usize,
        #[source]
        source: Box<SharingError>,
    },
}

impl SharingError {
    /// Wraps this error with the position of the unit that produced it
    #[must_use]
    pub fn at_unit(self, unit: usize) -> Self {
        Self::AtUnit {
            unit,
            source: Box::new(self),
        }
    }

    /// Returns the underlying error kind, looking through unit wrappers
    #[must_use]
    pub fn root(&self) -> &SharingError {
        match self {
            Self::AtUnit { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns the unit index attached to this error, if any
    #[must_use]
    pub fn unit(&self) -> Option<usize> {
        match self {
            Self::AtUnit { unit, .. } => Some(*unit),
            _ => None,
        }
    }

    pub(crate) fn invalid_scheme(reason: impl Into<String>) -> Self {
        Self::InvalidScheme {
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptShare {
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the sharing core
pub type Result<T, E = SharingError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_unwraps_nested_units() {
        let err = SharingError::InsufficientShares {
            required: 3,
            provided: 1,
        }
        .at_unit(7);

        assert_eq!(err.unit(), Some(7));
        assert!(matches!(
            err.root(),
            SharingError::InsufficientShares {
                required: 3,
                provided: 1
            }
        ));
        assert_eq!(err.to_string(), "Failed at unit 7");
    }

    #[test]
    fn test_root_of_plain_error_is_itself() {
        let err = SharingError::corrupt("value 300 exceeds a byte");
        assert_eq!(err.root(), &err);
        assert_eq!(err.unit(), None);
        assert!(err.to_string().contains("value 300 exceeds a byte"));
    }
}
