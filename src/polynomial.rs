//! Random polynomials whose constant term is the secret

use std::fmt;

use rand::{CryptoRng, Rng, RngCore};
use zeroize::Zeroizing;

use crate::domain::Threshold;
use crate::field::PrimeField;

/// A degree-(k-1) polynomial over a prime field
///
/// Coefficients are wiped when the polynomial is dropped and never appear in
/// `Debug` output. A polynomial only lives for the duration of one unit's
/// share generation.
pub struct Polynomial<'f> {
    coefficients: Zeroizing<Vec<u64>>,
    field: &'f PrimeField,
}

impl<'f> Polynomial<'f> {
    /// Draws a fresh polynomial with `f(0) = secret`
    ///
    /// The remaining `k - 1` coefficients are sampled uniformly from `[0, P)`.
    /// `secret` must already be a field element.
    pub fn random<R>(secret: u64, threshold: Threshold, field: &'f PrimeField, rng: &mut R) -> Self
    where
        R: RngCore + CryptoRng,
    {
        debug_assert!(field.contains(secret), "secret must be reduced before sharing");

        let degree = *threshold as usize - 1;
        let mut coefficients = Zeroizing::new(Vec::with_capacity(degree + 1));
        coefficients.push(secret);
        for _ in 0..degree {
            coefficients.push(rng.gen_range(0..field.modulus()));
        }

        Self {
            coefficients,
            field,
        }
    }

    /// Builds a polynomial from explicit coefficients, lowest degree first
    #[cfg(test)]
    pub(crate) fn from_coefficients(coefficients: Vec<u64>, field: &'f PrimeField) -> Self {
        Self {
            coefficients: Zeroizing::new(coefficients),
            field,
        }
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at `x` using Horner's rule
    #[must_use]
    pub fn evaluate(&self, x: u64) -> u64 {
        let x = x % self.field.modulus();
        self.coefficients
            .iter()
            .rev()
            .fold(0, |acc, &coefficient| {
                self.field.add(self.field.mul(acc, x), coefficient)
            })
    }
}

impl fmt::Debug for Polynomial<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polynomial")
            .field("degree", &self.degree())
            .field("coefficients", &"<redacted>")
            .finish()
    }
}
