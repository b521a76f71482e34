//! `ShareCount` newtype for secret sharing

use crate::error::{Result, SharingError};

/// Number of shares to create (1 <= n <= 1024)
///
/// Sharing costs n polynomial evaluations per secret unit, so n is capped at
/// [`ShareCount::MAX`]. The field adds a second bound: shares are evaluated at
/// x = 1..=n, so n must also stay below the modulus. That check lives in
/// [`ThresholdScheme`](super::ThresholdScheme).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShareCount(u32);

impl ShareCount {
    /// Minimum valid share count
    pub const MIN: u32 = 1;

    /// Maximum valid share count
    pub const MAX: u32 = 1024;

    /// Creates a new share count
    ///
    /// # Errors
    /// Returns [`SharingError::InvalidScheme`] if count is 0 or above [`ShareCount::MAX`]
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharewise::domain::ShareCount;
    ///
    /// let count = ShareCount::new(5).unwrap();
    /// assert_eq!(*count, 5);
    ///
    /// assert!(ShareCount::new(0).is_err());
    /// assert!(ShareCount::new(ShareCount::MAX + 1).is_err());
    /// ```
    pub fn new(value: u32) -> Result<Self> {
        if value < Self::MIN {
            return Err(SharingError::invalid_scheme("share count must be at least 1"));
        }
        if value > Self::MAX {
            return Err(SharingError::invalid_scheme(format!(
                "share count {value} exceeds the maximum of {}",
                Self::MAX
            )));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for ShareCount {
    type Target = u32;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
