//! Threshold newtype for secret sharing

use super::ShareCount;
use crate::error::{Result, SharingError};

/// Threshold k: the number of shares needed to reconstruct (1 <= k <= 1024)
///
/// A threshold of 1 is accepted. It yields a degree-0 polynomial, so every
/// share carries the secret in the clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(u32);

impl Threshold {
    /// Maximum valid threshold; k can never exceed the share count anyway
    pub const MAX: u32 = ShareCount::MAX;

    /// Creates a new threshold, returning an error if value < 1
    ///
    /// # Errors
    /// Returns [`SharingError::InvalidScheme`] if the threshold is zero or above [`Threshold::MAX`]
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharewise::domain::Threshold;
    ///
    /// let threshold = Threshold::new(3).unwrap();
    /// assert_eq!(*threshold, 3);
    ///
    /// assert!(Threshold::new(0).is_err());
    /// assert!(Threshold::new(4_000_000_000).is_err());
    /// ```
    pub fn new(value: u32) -> Result<Self> {
        if value == 0 {
            return Err(SharingError::invalid_scheme("threshold must be at least 1"));
        }
        if value > Self::MAX {
            return Err(SharingError::invalid_scheme(format!(
                "threshold {value} exceeds the maximum of {}",
                Self::MAX
            )));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for Threshold {
    type Target = u32;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
