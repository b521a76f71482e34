//! `ShareIndex` newtype for secret sharing

use std::fmt;

use crate::error::{Result, SharingError};

/// Share index: the x coordinate a share was evaluated at (x >= 1)
///
/// x = 0 is where the polynomial holds the secret, so it can never identify a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShareIndex(u32);

impl ShareIndex {
    /// Creates a new share index
    ///
    /// # Errors
    /// Returns [`SharingError::InvalidShareIndex`] if index is 0
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharewise::domain::ShareIndex;
    ///
    /// let index = ShareIndex::new(1).unwrap();
    /// assert_eq!(*index, 1);
    ///
    /// // Invalid: 0 is reserved for the secret
    /// assert!(ShareIndex::new(0).is_err());
    /// ```
    pub fn new(value: u32) -> Result<Self> {
        if value == 0 {
            return Err(SharingError::InvalidShareIndex { value: 0 });
        }
        Ok(Self(value))
    }

    /// The index as a field element
    #[inline]
    #[must_use]
    pub fn as_field(&self) -> u64 {
        u64::from(self.0)
    }
}

impl std::ops::Deref for ShareIndex {
    type Target = u32;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for ShareIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
