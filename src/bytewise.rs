//! Byte-wise sharing of text and grayscale images
//!
//! Every byte of a text secret (or the luminance of every pixel) is shared
//! independently: each unit gets its own freshly drawn polynomial, even when
//! values repeat, so identical units produce unrelated shares.
//!
//! # Examples
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use sharewise::bytewise::{reconstruct_text, share_text};
//! use sharewise::domain::{ShareIndex, ThresholdScheme};
//! use sharewise::field::DEFAULT_MODULUS;
//!
//! let scheme = ThresholdScheme::from_parts(3, 5, DEFAULT_MODULUS).unwrap();
//! let shares = share_text("Hi", &scheme, &mut OsRng).unwrap();
//! assert_eq!(shares.len(), 2);
//!
//! // Holders 5, 2 and 4 get together
//! let holders: Vec<ShareIndex> = [5, 2, 4].into_iter().map(|x| ShareIndex::new(x).unwrap()).collect();
//! let text = reconstruct_text(&shares.select(&holders), &scheme).unwrap();
//! assert_eq!(text.as_str(), "Hi");
//! ```

use std::ops::ControlFlow;

use rand::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ThresholdScheme;
use crate::engine::{generate_shares, reconstruct_secret};
use crate::error::{Result, SharingError};
use crate::pixels::{Dimensions, PixelBuffer};
use crate::shares::{SecretShares, ShareSet};

/// Cooperative progress and cancellation hook for long per-unit loops
///
/// Called after each unit with the number of completed units and the total.
/// Returning [`ControlFlow::Break`] stops the loop; the operation then fails
/// with [`SharingError::Cancelled`] and no partial result is returned.
pub trait Progress {
    fn on_unit(&mut self, completed: usize, total: usize) -> ControlFlow<()>;
}

impl<F> Progress for F
where
    F: FnMut(usize, usize) -> ControlFlow<()>,
{
    fn on_unit(&mut self, completed: usize, total: usize) -> ControlFlow<()> {
        self(completed, total)
    }
}

/// Progress hook that never cancels
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn on_unit(&mut self, _completed: usize, _total: usize) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Shares of a grayscale image together with its dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageShares {
    pub shares: SecretShares,
    pub dimensions: Dimensions,
}

/// Shares every UTF-8 byte of `text` independently
///
/// # Errors
/// Propagates engine errors, wrapped with the failing byte position
pub fn share_text<R>(text: &str, scheme: &ThresholdScheme, rng: &mut R) -> Result<SecretShares>
where
    R: RngCore + CryptoRng,
{
    debug!(
        units = text.len(),
        threshold = *scheme.threshold(),
        shares = *scheme.share_count(),
        "sharing text secret"
    );
    share_units(text.bytes(), scheme, rng, &mut NoProgress)
}

/// Reconstructs a text secret from per-byte share sets
///
/// # Errors
/// - Engine errors, wrapped with the failing byte position
/// - [`SharingError::CorruptShare`] if a value exceeds a byte or the bytes are not UTF-8
pub fn reconstruct_text(shares: &SecretShares, scheme: &ThresholdScheme) -> Result<Zeroizing<String>> {
    debug!(units = shares.len(), threshold = *scheme.threshold(), "reconstructing text secret");

    let bytes = reconstruct_units(shares, scheme, &mut NoProgress)?;
    let text = std::str::from_utf8(&bytes).map_err(|e| {
        SharingError::corrupt(format!(
            "reconstructed bytes are not valid UTF-8 (first invalid byte at unit {})",
            e.valid_up_to()
        ))
    })?;

    Ok(Zeroizing::new(text.to_owned()))
}

/// Shares the luminance of every pixel, row-major
///
/// # Errors
/// Propagates engine errors, wrapped with the failing pixel position
pub fn share_image<R>(image: &PixelBuffer, scheme: &ThresholdScheme, rng: &mut R) -> Result<ImageShares>
where
    R: RngCore + CryptoRng,
{
    share_image_with_progress(image, scheme, rng, &mut NoProgress)
}

/// [`share_image`] with a progress and cancellation hook
///
/// # Errors
/// As [`share_image`], plus [`SharingError::Cancelled`] if `progress` breaks
pub fn share_image_with_progress<R, P>(
    image: &PixelBuffer,
    scheme: &ThresholdScheme,
    rng: &mut R,
    progress: &mut P,
) -> Result<ImageShares>
where
    R: RngCore + CryptoRng,
    P: Progress + ?Sized,
{
    let dimensions = image.dimensions();
    debug!(
        width = dimensions.width,
        height = dimensions.height,
        threshold = *scheme.threshold(),
        shares = *scheme.share_count(),
        "sharing grayscale image"
    );

    let shares = share_units(image.luminance(), scheme, rng, progress)?;
    Ok(ImageShares { shares, dimensions })
}

/// Rebuilds an opaque grayscale RGBA image from per-pixel share sets
///
/// # Errors
/// - [`SharingError::DimensionMismatch`] if the unit count is not `width * height`
/// - Engine errors and [`SharingError::CorruptShare`], wrapped with the pixel position
pub fn reconstruct_image(
    shares: &SecretShares,
    dimensions: Dimensions,
    scheme: &ThresholdScheme,
) -> Result<PixelBuffer> {
    reconstruct_image_with_progress(shares, dimensions, scheme, &mut NoProgress)
}

/// [`reconstruct_image`] with a progress and cancellation hook
///
/// # Errors
/// As [`reconstruct_image`], plus [`SharingError::Cancelled`] if `progress` breaks
pub fn reconstruct_image_with_progress<P>(
    shares: &SecretShares,
    dimensions: Dimensions,
    scheme: &ThresholdScheme,
    progress: &mut P,
) -> Result<PixelBuffer>
where
    P: Progress + ?Sized,
{
    let expected = dimensions.pixel_count();
    let actual = shares.len() as u64;
    if expected != actual {
        return Err(SharingError::DimensionMismatch { expected, actual });
    }

    debug!(
        width = dimensions.width,
        height = dimensions.height,
        threshold = *scheme.threshold(),
        "reconstructing grayscale image"
    );

    let levels = reconstruct_units(shares, scheme, progress)?;
    PixelBuffer::from_gray(dimensions, &levels)
}

fn share_units<I, R, P>(
    units: I,
    scheme: &ThresholdScheme,
    rng: &mut R,
    progress: &mut P,
) -> Result<SecretShares>
where
    I: ExactSizeIterator<Item = u8>,
    R: RngCore + CryptoRng,
    P: Progress + ?Sized,
{
    let total = units.len();
    let mut sets: Vec<ShareSet> = Vec::with_capacity(total);

    for (position, unit) in units.enumerate() {
        let set = generate_shares(u64::from(unit), scheme, rng).map_err(|e| e.at_unit(position))?;
        sets.push(set);

        if progress.on_unit(position + 1, total).is_break() {
            return Err(SharingError::Cancelled {
                completed: position + 1,
                total,
            });
        }
    }

    Ok(SecretShares::new(sets))
}

fn reconstruct_units<P>(
    shares: &SecretShares,
    scheme: &ThresholdScheme,
    progress: &mut P,
) -> Result<Zeroizing<Vec<u8>>>
where
    P: Progress + ?Sized,
{
    let total = shares.len();
    let mut bytes = Zeroizing::new(Vec::with_capacity(total));

    for (position, set) in shares.iter().enumerate() {
        let value = reconstruct_secret(set.as_slice(), scheme).map_err(|e| e.at_unit(position))?;
        let byte = u8::try_from(value).map_err(|_| {
            SharingError::corrupt(format!("reconstructed value {value} does not fit in a byte"))
                .at_unit(position)
        })?;
        bytes.push(byte);

        if progress.on_unit(position + 1, total).is_break() {
            return Err(SharingError::Cancelled {
                completed: position + 1,
                total,
            });
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShareIndex;
    use crate::field::DEFAULT_MODULUS;
    use crate::pixels::PixelLayout;
    use crate::shares::Share;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn scheme(k: u32, n: u32) -> ThresholdScheme {
        ThresholdScheme::from_parts(k, n, DEFAULT_MODULUS).unwrap()
    }

    fn holders(xs: &[u32]) -> Vec<ShareIndex> {
        xs.iter().map(|&x| ShareIndex::new(x).unwrap()).collect()
    }

    #[test]
    fn test_text_round_trip_any_three_of_five() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let scheme = scheme(3, 5);
        let shares = share_text("Hi", &scheme, &mut rng).unwrap();

        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|set| set.len() == 5));

        for picked in [[1, 2, 3], [5, 3, 1], [2, 4, 5], [4, 1, 3]] {
            let text = reconstruct_text(&shares.select(&holders(&picked)), &scheme).unwrap();
            assert_eq!(text.as_str(), "Hi", "holders {picked:?}");
        }
    }

    #[test]
    fn test_multibyte_text_round_trip() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let scheme = scheme(2, 3);
        let secret = "naïve – 秘密 🔑";
        let shares = share_text(secret, &scheme, &mut rng).unwrap();

        assert_eq!(shares.len(), secret.len());
        let text = reconstruct_text(&shares.select(&holders(&[3, 1])), &scheme).unwrap();
        assert_eq!(text.as_str(), secret);
    }

    #[test]
    fn test_empty_text() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let scheme = scheme(2, 3);
        let shares = share_text("", &scheme, &mut rng).unwrap();
        assert!(shares.is_empty());
        assert_eq!(reconstruct_text(&shares, &scheme).unwrap().as_str(), "");
    }

    #[test]
    fn test_repeated_bytes_get_independent_polynomials() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let shares = share_text("aaaa", &scheme(2, 3), &mut rng).unwrap();

        let first_ys: Vec<u64> = shares.iter().map(|set| set.as_slice()[0].y()).collect();
        assert!(first_ys.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_text_insufficient_shares_reports_unit() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let scheme = scheme(3, 5);
        let shares = share_text("ok", &scheme, &mut rng).unwrap();

        let err = reconstruct_text(&shares.select(&holders(&[1, 2])), &scheme).unwrap_err();
        assert_eq!(err.unit(), Some(0));
        assert!(matches!(
            err.root(),
            SharingError::InsufficientShares {
                required: 3,
                provided: 2
            }
        ));
    }

    #[test]
    fn test_value_above_byte_is_corrupt() {
        let scheme = scheme(1, 1);
        let shares = SecretShares::new(vec![
            ShareSet::new(vec![Share::new(ShareIndex::new(1).unwrap(), 65)]),
            ShareSet::new(vec![Share::new(ShareIndex::new(1).unwrap(), 300)]),
        ]);

        let err = reconstruct_text(&shares, &scheme).unwrap_err();
        assert_eq!(err.unit(), Some(1));
        assert!(matches!(err.root(), SharingError::CorruptShare { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_corrupt() {
        let scheme = scheme(1, 1);
        let shares = SecretShares::new(vec![ShareSet::new(vec![Share::new(
            ShareIndex::new(1).unwrap(),
            0xFF,
        )])]);

        let err = reconstruct_text(&shares, &scheme).unwrap_err();
        assert!(matches!(err, SharingError::CorruptShare { .. }));
    }

    #[test]
    fn test_image_round_trip() {
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        let scheme = scheme(2, 4);
        let image = PixelBuffer::new(
            Dimensions::new(2, 2),
            PixelLayout::Rgb,
            vec![0, 0, 0, 255, 255, 255, 255, 0, 0, 10, 20, 30],
        )
        .unwrap();

        let shared = share_image(&image, &scheme, &mut rng).unwrap();
        assert_eq!(shared.dimensions, Dimensions::new(2, 2));
        assert_eq!(shared.shares.len(), 4);

        let restored = reconstruct_image(
            &shared.shares.select(&holders(&[4, 2])),
            shared.dimensions,
            &scheme,
        )
        .unwrap();

        let expected_levels: Vec<u8> = image.luminance().collect();
        assert_eq!(expected_levels, vec![0, 255, 76, 18]);
        assert_eq!(restored.layout(), PixelLayout::Rgba);
        assert_eq!(
            restored.data(),
            &[0, 0, 0, 255, 255, 255, 255, 255, 76, 76, 76, 255, 18, 18, 18, 255]
        );
    }

    #[test]
    fn test_image_dimension_mismatch() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let scheme = scheme(2, 3);
        let image = PixelBuffer::from_gray(Dimensions::new(3, 1), &[1, 2, 3]).unwrap();
        let shared = share_image(&image, &scheme, &mut rng).unwrap();

        let err = reconstruct_image(&shared.shares, Dimensions::new(2, 2), &scheme).unwrap_err();
        assert_eq!(
            err,
            SharingError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_progress_reports_every_unit() {
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let scheme = scheme(2, 2);
        let image = PixelBuffer::from_gray(Dimensions::new(5, 1), &[1, 2, 3, 4, 5]).unwrap();

        let mut seen = Vec::new();
        let mut record = |completed: usize, total: usize| {
            seen.push((completed, total));
            ControlFlow::Continue(())
        };
        share_image_with_progress(&image, &scheme, &mut rng, &mut record).unwrap();

        assert_eq!(seen, vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
    }

    #[test]
    fn test_cancellation_discards_partial_output() {
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let scheme = scheme(2, 2);
        let image = PixelBuffer::from_gray(Dimensions::new(4, 1), &[9, 9, 9, 9]).unwrap();
        let shared = share_image(&image, &scheme, &mut rng).unwrap();

        let mut stop_after_two = |completed: usize, _total: usize| {
            if completed == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        };
        let err = reconstruct_image_with_progress(
            &shared.shares,
            shared.dimensions,
            &scheme,
            &mut stop_after_two,
        )
        .unwrap_err();

        assert_eq!(
            err,
            SharingError::Cancelled {
                completed: 2,
                total: 4
            }
        );
    }
}
