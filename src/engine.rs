//! Share generation and Lagrange reconstruction for a single secret value
//!
//! Both operations are pure functions of their inputs. Randomness enters only
//! through the injected generator, which must be cryptographically secure:
//! the unpredictability of the polynomial coefficients is what keeps fewer
//! than k shares from revealing the secret.
//!
//! # Examples
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use sharewise::domain::ThresholdScheme;
//! use sharewise::engine::{generate_shares, reconstruct_secret};
//! use sharewise::field::DEFAULT_MODULUS;
//!
//! let scheme = ThresholdScheme::from_parts(3, 5, DEFAULT_MODULUS).unwrap();
//! let shares = generate_shares(123, &scheme, &mut OsRng).unwrap();
//! assert_eq!(shares.len(), 5);
//!
//! // Any three shares, in any order
//! let picked = [shares.as_slice()[4], shares.as_slice()[0], shares.as_slice()[2]];
//! assert_eq!(reconstruct_secret(&picked, &scheme).unwrap(), 123);
//! ```

use rand::{CryptoRng, RngCore};

use crate::domain::{ShareIndex, ThresholdScheme};
use crate::error::{Result, SharingError};
use crate::polynomial::Polynomial;
use crate::shares::{Share, ShareSet};

/// Splits `secret` into `n` shares evaluated at x = 1..=n
///
/// # Errors
/// - [`SharingError::InvalidScheme`] if the scheme invariants do not hold
/// - [`SharingError::InvalidSecret`] if `secret` is not a field element
pub fn generate_shares<R>(secret: u64, scheme: &ThresholdScheme, rng: &mut R) -> Result<ShareSet>
where
    R: RngCore + CryptoRng,
{
    scheme.validate()?;

    let field = scheme.field();
    if !field.contains(secret) {
        return Err(SharingError::InvalidSecret {
            value: secret,
            modulus: field.modulus(),
        });
    }

    let polynomial = Polynomial::random(secret, scheme.threshold(), field, rng);

    (1..=*scheme.share_count())
        .map(|x| {
            let index = ShareIndex::new(x)?;
            Ok(Share::new(index, polynomial.evaluate(index.as_field())))
        })
        .collect::<Result<Vec<_>>>()
        .map(ShareSet::new)
}

/// Recovers the secret from at least `k` shares
///
/// Only the first `k` points are used. Any `k` points with distinct x
/// coordinates from the same sharing determine the same polynomial, so the
/// order in which the caller supplies them does not matter.
///
/// # Errors
/// - [`SharingError::InsufficientShares`] if fewer than `k` points are supplied
/// - [`SharingError::CorruptShare`] if a coordinate lies outside the field
/// - [`SharingError::NoInverse`] if two selected points share an x coordinate
pub fn reconstruct_secret(points: &[Share], scheme: &ThresholdScheme) -> Result<u64> {
    let required = *scheme.threshold() as usize;
    if points.len() < required {
        return Err(SharingError::InsufficientShares {
            required,
            provided: points.len(),
        });
    }

    let field = scheme.field();
    let selected = &points[..required];

    for point in selected {
        if !field.contains(point.x().as_field()) || !field.contains(point.y()) {
            return Err(SharingError::corrupt(format!(
                "share ({point}) lies outside the field modulo {}",
                field.modulus()
            )));
        }
    }

    let mut secret = 0;
    for (i, point_i) in selected.iter().enumerate() {
        let x_i = point_i.x().as_field();
        let mut numerator = 1;
        let mut denominator = 1;

        for (j, point_j) in selected.iter().enumerate() {
            if i == j {
                continue;
            }
            let x_j = point_j.x().as_field();
            numerator = field.mul(numerator, field.neg(x_j));
            denominator = field.mul(denominator, field.sub(x_i, x_j));
        }

        let basis = field.mul(numerator, field.inverse(denominator)?);
        secret = field.add(secret, field.mul(point_i.y(), basis));
    }

    Ok(secret)
}
