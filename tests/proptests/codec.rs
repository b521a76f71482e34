//! Property tests for the share file format

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sharewise::SharingError;
use sharewise::codec::{load, save};
use sharewise::domain::ShareIndex;
use sharewise::pixels::Dimensions;
use sharewise::shares::{SecretShares, Share, ShareSet};

/// Arbitrary share collections, including empty ones and ragged units
#[derive(Clone, Debug)]
struct ArbitraryShares(SecretShares);

impl Arbitrary for ArbitraryShares {
    fn arbitrary(g: &mut Gen) -> Self {
        let unit_count = usize::arbitrary(g) % 16;
        let units = (0..unit_count)
            .map(|_| {
                let share_count = usize::arbitrary(g) % 8;
                let shares = (0..share_count)
                    .map(|_| {
                        let x = u32::arbitrary(g).max(1);
                        Share::new(ShareIndex::new(x).unwrap(), u64::arbitrary(g))
                    })
                    .collect();
                ShareSet::new(shares)
            })
            .collect();
        ArbitraryShares(SecretShares::new(units))
    }
}

#[quickcheck]
fn prop_text_document_round_trip(shares: ArbitraryShares) -> bool {
    let ArbitraryShares(shares) = shares;
    load(&save(&shares, None)).is_ok_and(|doc| doc.shares == shares && doc.dimensions.is_none())
}

#[quickcheck]
fn prop_image_document_round_trip(shares: ArbitraryShares, width: u32, height: u32) -> bool {
    let ArbitraryShares(shares) = shares;
    let dimensions = Dimensions::new(width, height);
    load(&save(&shares, Some(dimensions)))
        .is_ok_and(|doc| doc.shares == shares && doc.dimensions == Some(dimensions))
}

/// Dropping any non-blank line from a non-trivial document is always detected
#[quickcheck]
fn prop_truncated_document_rejected(shares: ArbitraryShares, cut: usize) -> bool {
    let ArbitraryShares(shares) = shares;
    let text = save(&shares, None);
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 2 {
        return true;
    }

    // Remove one line other than the header so the declared counts no longer match
    let removed = 1 + cut % (lines.len() - 1);
    let damaged: String = lines
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != removed)
        .map(|(_, line)| format!("{line}\n"))
        .collect();

    matches!(load(&damaged), Err(SharingError::Parse { .. }))
}

/// Appending a stray share line is always detected
#[quickcheck]
fn prop_trailing_garbage_rejected(shares: ArbitraryShares, x: u32, y: u64) -> bool {
    let ArbitraryShares(shares) = shares;
    let mut text = save(&shares, None);
    text.push_str(&format!("{} {y}\n", x.max(1)));

    matches!(load(&text), Err(SharingError::Parse { .. }))
}
