use anyhow::{Context, Result, bail};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::bytewise;
use crate::codec::{self, ShareDocument};
use crate::domain::{ShareIndex, ThresholdScheme};
use crate::field::DEFAULT_MODULUS;
use crate::pixels::{Dimensions, PixelBuffer};
use crate::shares::SecretShares;

fn default_modulus() -> u64 {
    DEFAULT_MODULUS
}

/// Serialisable scheme parameters, as received from a boundary layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeParams {
    pub threshold: u32,
    pub shares: u32,
    #[serde(default = "default_modulus")]
    pub modulus: u64,
}

impl SchemeParams {
    /// Parameters over the default field
    #[must_use]
    pub fn new(threshold: u32, shares: u32) -> Self {
        Self {
            threshold,
            shares,
            modulus: DEFAULT_MODULUS,
        }
    }

    /// Validates the parameters into a scheme
    ///
    /// # Errors
    /// Returns an error if threshold, share count or modulus are invalid
    pub fn scheme(&self) -> Result<ThresholdScheme> {
        ThresholdScheme::from_parts(self.threshold, self.shares, self.modulus)
            .context("Invalid scheme parameters")
    }
}

/// Summary of a split, suitable for JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    /// Number of secret units shared (bytes or pixels)
    pub units: usize,
    pub threshold: u32,
    pub share_count: u32,
    pub modulus: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}

/// A persisted share document together with its summary
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub document: String,
    pub summary: SplitSummary,
}

/// Split a text secret and encode the shares in the persisted format
///
/// # Errors
/// Returns an error if share generation fails
pub fn split_text(secret: &str, scheme: &ThresholdScheme) -> Result<SplitOutcome> {
    let shares =
        bytewise::share_text(secret, scheme, &mut OsRng).context("Failed to share text secret")?;

    let outcome = outcome(&shares, None, scheme);
    info!(
        units = outcome.summary.units,
        threshold = outcome.summary.threshold,
        shares = outcome.summary.share_count,
        "text secret split"
    );
    Ok(outcome)
}

/// Combine a persisted text share document back into the secret
///
/// `participants` restricts reconstruction to the listed share holders, in
/// that order. An empty list uses the stored shares as they are.
///
/// # Errors
/// Returns an error if the document is malformed, holds image shares, or
/// reconstruction fails
pub fn combine_text(
    document: &str,
    scheme: &ThresholdScheme,
    participants: &[ShareIndex],
) -> Result<Zeroizing<String>> {
    let ShareDocument { shares, dimensions } =
        codec::load(document).context("Failed to parse share document")?;

    if dimensions.is_some() {
        bail!("Share document holds image shares; combine it as an image");
    }

    let shares = select_participants(shares, participants);
    check_share_counts(&shares, scheme);

    let secret =
        bytewise::reconstruct_text(&shares, scheme).context("Failed to reconstruct text secret")?;
    info!(units = shares.len(), "text secret reconstructed");
    Ok(secret)
}

/// Split an image's grayscale levels and encode the shares in the persisted format
///
/// # Errors
/// Returns an error if share generation fails
pub fn split_image(image: &PixelBuffer, scheme: &ThresholdScheme) -> Result<SplitOutcome> {
    let shared =
        bytewise::share_image(image, scheme, &mut OsRng).context("Failed to share image")?;

    let outcome = outcome(&shared.shares, Some(shared.dimensions), scheme);
    info!(
        width = shared.dimensions.width,
        height = shared.dimensions.height,
        threshold = outcome.summary.threshold,
        shares = outcome.summary.share_count,
        "image split"
    );
    Ok(outcome)
}

/// Combine a persisted image share document into an opaque grayscale RGBA image
///
/// # Errors
/// Returns an error if the document is malformed, holds text shares, or
/// reconstruction fails
pub fn combine_image(
    document: &str,
    scheme: &ThresholdScheme,
    participants: &[ShareIndex],
) -> Result<PixelBuffer> {
    let ShareDocument { shares, dimensions } =
        codec::load(document).context("Failed to parse share document")?;

    let Some(dimensions) = dimensions else {
        bail!("Share document holds text shares; combine it as text");
    };

    let shares = select_participants(shares, participants);
    check_share_counts(&shares, scheme);

    let image = bytewise::reconstruct_image(&shares, dimensions, scheme)
        .context("Failed to reconstruct image")?;
    info!(
        width = dimensions.width,
        height = dimensions.height,
        "image reconstructed"
    );
    Ok(image)
}

fn outcome(
    shares: &SecretShares,
    dimensions: Option<Dimensions>,
    scheme: &ThresholdScheme,
) -> SplitOutcome {
    SplitOutcome {
        document: codec::save(shares, dimensions),
        summary: SplitSummary {
            units: shares.len(),
            threshold: *scheme.threshold(),
            share_count: *scheme.share_count(),
            modulus: scheme.field().modulus(),
            dimensions,
        },
    }
}

fn select_participants(shares: SecretShares, participants: &[ShareIndex]) -> SecretShares {
    if participants.is_empty() {
        shares
    } else {
        shares.select(participants)
    }
}

/// Warns when units carry differing numbers of shares, which hints at a spliced document
fn check_share_counts(shares: &SecretShares, scheme: &ThresholdScheme) {
    let Some(first) = shares.iter().next() else {
        return;
    };
    if shares.iter().any(|set| set.len() != first.len()) {
        warn!("share document units carry differing numbers of shares");
    }
    if first.len() > *scheme.share_count() as usize {
        warn!(
            found = first.len(),
            expected = *scheme.share_count(),
            "share document holds more shares per unit than the scheme's share count"
        );
    }
}
