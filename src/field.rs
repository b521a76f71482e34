//! Modular arithmetic over a prime field
//!
//! All values handed out by [`PrimeField`] are residues in `[0, P)`. Products
//! are widened to `u128` before reduction, and signed intermediates such as
//! `-x_j` or `x_i - x_j` go through [`PrimeField::reduce`] so nothing negative
//! ever escapes.

use crate::error::{Result, SharingError};

/// Default modulus: the Mersenne prime 2^31 - 1
pub const DEFAULT_MODULUS: u64 = 2_147_483_647;

/// A finite field `Z/PZ` for a configurable prime `P`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeField {
    modulus: u64,
}

impl PrimeField {
    /// Smallest accepted modulus; every byte value must be a field element
    pub const MIN_MODULUS: u64 = 257;

    /// Creates a field for the given modulus
    ///
    /// Primality is the caller's responsibility. A composite modulus surfaces
    /// later as [`SharingError::NoInverse`] during reconstruction.
    ///
    /// # Errors
    /// Returns [`SharingError::InvalidScheme`] if the modulus is below 257
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharewise::field::{PrimeField, DEFAULT_MODULUS};
    ///
    /// let field = PrimeField::new(DEFAULT_MODULUS).unwrap();
    /// assert_eq!(field.sub(2, 5), DEFAULT_MODULUS - 3);
    ///
    /// // Too small to hold a byte
    /// assert!(PrimeField::new(251).is_err());
    /// ```
    pub fn new(modulus: u64) -> Result<Self> {
        if modulus < Self::MIN_MODULUS {
            return Err(SharingError::invalid_scheme(format!(
                "modulus {modulus} is smaller than {}; byte secrets would not fit",
                Self::MIN_MODULUS
            )));
        }
        Ok(Self { modulus })
    }

    #[must_use]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Returns true if `value` is a canonical residue
    #[inline]
    #[must_use]
    pub fn contains(&self, value: u64) -> bool {
        value < self.modulus
    }

    /// Normalises a possibly negative value into `[0, P)`
    #[inline]
    #[must_use]
    pub fn reduce(&self, value: i128) -> u64 {
        let reduced = value.rem_euclid(i128::from(self.modulus));
        u64::try_from(reduced).unwrap_or_else(|_| unreachable!("residue < modulus fits in u64"))
    }

    #[inline]
    #[must_use]
    pub fn add(&self, a: u64, b: u64) -> u64 {
        let sum = (u128::from(a) + u128::from(b)) % u128::from(self.modulus);
        Self::narrow(sum)
    }

    #[inline]
    #[must_use]
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        self.reduce(i128::from(a) - i128::from(b))
    }

    #[inline]
    #[must_use]
    pub fn neg(&self, a: u64) -> u64 {
        self.reduce(-i128::from(a))
    }

    #[inline]
    #[must_use]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        let product = (u128::from(a) * u128::from(b)) % u128::from(self.modulus);
        Self::narrow(product)
    }

    /// Multiplicative inverse via the extended Euclidean algorithm
    ///
    /// # Errors
    /// Returns [`SharingError::NoInverse`] if `gcd(a, P) != 1`, which includes `a ≡ 0`
    pub fn inverse(&self, a: u64) -> Result<u64> {
        let modulus = i128::from(self.modulus);
        let value = a % self.modulus;

        let (mut old_r, mut r) = (i128::from(value), modulus);
        let (mut old_s, mut s) = (1_i128, 0_i128);

        while r != 0 {
            let quotient = old_r / r;
            (old_r, r) = (r, old_r - quotient * r);
            (old_s, s) = (s, old_s - quotient * s);
        }

        if old_r != 1 {
            return Err(SharingError::NoInverse {
                value,
                modulus: self.modulus,
            });
        }

        Ok(self.reduce(old_s))
    }

    #[inline]
    fn narrow(value: u128) -> u64 {
        u64::try_from(value).unwrap_or_else(|_| unreachable!("residue < modulus fits in u64"))
    }
}

impl Default for PrimeField {
    fn default() -> Self {
        Self {
            modulus: DEFAULT_MODULUS,
        }
    }
}
