//! Threshold scheme validation

use crate::error::{Result, SharingError};
use crate::field::PrimeField;

use super::{ShareCount, Threshold};

/// Validated (k, n) pair bound to the field the shares live in
///
/// Enforces `1 <= k <= n < P` at construction. The scheme carries no secret
/// material and can be rebuilt freely for every sharing or reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdScheme {
    threshold: Threshold,
    share_count: ShareCount,
    field: PrimeField,
}

impl ThresholdScheme {
    /// Creates a scheme over the default field (P = 2^31 - 1)
    ///
    /// # Errors
    /// Returns [`SharingError::InvalidScheme`] if threshold exceeds share count
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharewise::domain::{ShareCount, Threshold, ThresholdScheme};
    ///
    /// let scheme = ThresholdScheme::new(
    ///     Threshold::new(3).unwrap(),
    ///     ShareCount::new(5).unwrap(),
    /// ).unwrap();
    ///
    /// assert_eq!(*scheme.threshold(), 3);
    /// assert_eq!(*scheme.share_count(), 5);
    ///
    /// // Invalid: threshold > share_count
    /// let result = ThresholdScheme::new(
    ///     Threshold::new(5).unwrap(),
    ///     ShareCount::new(3).unwrap(),
    /// );
    /// assert!(result.is_err());
    /// ```
    pub fn new(threshold: Threshold, share_count: ShareCount) -> Result<Self> {
        Self::with_field(threshold, share_count, PrimeField::default())
    }

    /// Creates a scheme over a custom field
    ///
    /// # Errors
    /// Returns [`SharingError::InvalidScheme`] if threshold exceeds share count,
    /// or if the share count does not fit below the modulus
    pub fn with_field(
        threshold: Threshold,
        share_count: ShareCount,
        field: PrimeField,
    ) -> Result<Self> {
        let scheme = Self {
            threshold,
            share_count,
            field,
        };
        scheme.validate()?;
        Ok(scheme)
    }

    /// Convenience constructor from raw parameters
    ///
    /// # Errors
    /// Returns [`SharingError::InvalidScheme`] if any parameter is invalid
    pub fn from_parts(threshold: u32, share_count: u32, modulus: u64) -> Result<Self> {
        Self::with_field(
            Threshold::new(threshold)?,
            ShareCount::new(share_count)?,
            PrimeField::new(modulus)?,
        )
    }

    /// Re-checks the scheme invariants
    ///
    /// # Errors
    /// Returns [`SharingError::InvalidScheme`] describing the first violated invariant
    pub fn validate(&self) -> Result<()> {
        if *self.threshold == 0 {
            return Err(SharingError::invalid_scheme("threshold must be at least 1"));
        }
        if *self.threshold > *self.share_count {
            return Err(SharingError::invalid_scheme(format!(
                "threshold {} cannot exceed share count {}",
                *self.threshold, *self.share_count
            )));
        }
        if u64::from(*self.share_count) >= self.field.modulus() {
            return Err(SharingError::invalid_scheme(format!(
                "share count {} must be below the modulus {}",
                *self.share_count,
                self.field.modulus()
            )));
        }
        Ok(())
    }

    /// Gets the threshold value
    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Gets the share count value
    #[must_use]
    pub fn share_count(&self) -> ShareCount {
        self.share_count
    }

    #[must_use]
    pub fn field(&self) -> &PrimeField {
        &self.field
    }
}
