//! Property tests for share generation and reconstruction

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sharewise::SharingError;
use sharewise::bytewise::{reconstruct_text, share_text};
use sharewise::domain::{ShareIndex, ThresholdScheme};
use sharewise::engine::{generate_shares, reconstruct_secret};
use sharewise::field::DEFAULT_MODULUS;
use sharewise::shares::Share;

/// Wrapper for valid threshold and share count pairs
#[derive(Clone, Copy, Debug)]
struct ValidSchemeParams {
    threshold: u32,
    num_shares: u32,
}

impl ValidSchemeParams {
    fn scheme(self) -> ThresholdScheme {
        ThresholdScheme::from_parts(self.threshold, self.num_shares, DEFAULT_MODULUS).unwrap()
    }
}

impl Arbitrary for ValidSchemeParams {
    fn arbitrary(g: &mut Gen) -> Self {
        // Share count between 1 and 20 (keep it reasonable for testing)
        let num_shares = u32::from(u8::arbitrary(g) % 20) + 1;
        let threshold = u32::from(u8::arbitrary(g)) % num_shares + 1;

        ValidSchemeParams {
            threshold,
            num_shares,
        }
    }
}

/// Deterministic Fisher-Yates shuffle driven by a seed
fn shuffled(shares: &[Share], seed: u64) -> Vec<Share> {
    let mut shuffled = shares.to_vec();
    let mut state = seed;
    for i in (1..shuffled.len()).rev() {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let bound = u64::try_from(i + 1).unwrap_or_else(|_| unreachable!("index fits in u64"));
        let j = usize::try_from((state >> 33) % bound)
            .unwrap_or_else(|_| unreachable!("j <= i fits in usize"));
        shuffled.swap(i, j);
    }
    shuffled
}

/// Any k shares, in any order, recover any byte secret
#[quickcheck]
fn prop_random_share_selection_recovers_byte(
    secret: u8,
    params: ValidSchemeParams,
    rng_seed: u64,
    selection_seed: u64,
) -> bool {
    let scheme = params.scheme();
    let mut rng = ChaCha20Rng::seed_from_u64(rng_seed);
    let Ok(shares) = generate_shares(u64::from(secret), &scheme, &mut rng) else {
        return false;
    };

    let selection = shuffled(shares.as_slice(), selection_seed);
    reconstruct_secret(&selection[..params.threshold as usize], &scheme) == Ok(u64::from(secret))
}

/// Fewer than k shares are rejected outright
#[quickcheck]
fn prop_insufficient_shares_fail(secret: u8, params: ValidSchemeParams, rng_seed: u64) -> bool {
    let scheme = params.scheme();
    let mut rng = ChaCha20Rng::seed_from_u64(rng_seed);
    let shares = generate_shares(u64::from(secret), &scheme, &mut rng).unwrap();

    let insufficient = &shares.as_slice()[..params.threshold as usize - 1];
    matches!(
        reconstruct_secret(insufficient, &scheme),
        Err(SharingError::InsufficientShares { .. })
    )
}

/// Interpolating k-1 shares as if they were a complete set does not reveal the secret
#[quickcheck]
fn prop_below_threshold_interpolation_misses_secret(
    secret: u8,
    params: ValidSchemeParams,
    rng_seed: u64,
) -> bool {
    if params.threshold < 2 {
        return true;
    }

    let scheme = params.scheme();
    let mut rng = ChaCha20Rng::seed_from_u64(rng_seed);
    let shares = generate_shares(u64::from(secret), &scheme, &mut rng).unwrap();

    let weaker =
        ThresholdScheme::from_parts(params.threshold - 1, params.num_shares, DEFAULT_MODULUS)
            .unwrap();
    let guess = reconstruct_secret(shares.as_slice(), &weaker).unwrap();

    // Succeeds by accident with probability 1/P
    guess != u64::from(secret)
}

/// Reconstruction is a pure function of the supplied points
#[quickcheck]
fn prop_reconstruction_is_deterministic(secret: u8, params: ValidSchemeParams, rng_seed: u64) -> bool {
    let scheme = params.scheme();
    let mut rng = ChaCha20Rng::seed_from_u64(rng_seed);
    let shares = generate_shares(u64::from(secret), &scheme, &mut rng).unwrap();

    reconstruct_secret(shares.as_slice(), &scheme) == reconstruct_secret(shares.as_slice(), &scheme)
}

/// Text secrets survive a split and any threshold-sized combine
#[quickcheck]
fn prop_text_round_trip(text: String, params: ValidSchemeParams, rng_seed: u64) -> bool {
    let scheme = params.scheme();
    let mut rng = ChaCha20Rng::seed_from_u64(rng_seed);
    let Ok(shares) = share_text(&text, &scheme, &mut rng) else {
        return false;
    };

    // Take the last k holders, highest x first
    let holders: Vec<ShareIndex> = (1..=params.num_shares)
        .rev()
        .take(params.threshold as usize)
        .map(|x| ShareIndex::new(x).unwrap())
        .collect();

    match reconstruct_text(&shares.select(&holders), &scheme) {
        Ok(recovered) => recovered.as_str() == text,
        Err(_) => false,
    }
}

/// Shares from two different secrets do not combine into either secret
#[quickcheck]
fn prop_mixed_shares_fail(first: u8, second: u8, params: ValidSchemeParams, rng_seed: u64) -> bool {
    if first == second || params.threshold < 2 {
        return true;
    }

    let scheme = params.scheme();
    let mut rng = ChaCha20Rng::seed_from_u64(rng_seed);
    let shares1 = generate_shares(u64::from(first), &scheme, &mut rng).unwrap();
    let shares2 = generate_shares(u64::from(second), &scheme, &mut rng).unwrap();

    let k = params.threshold as usize;
    let half = k / 2;
    let mut mixed: Vec<Share> = shares1.as_slice()[..half].to_vec();
    mixed.extend_from_slice(&shares2.as_slice()[half..k]);

    match reconstruct_secret(&mixed, &scheme) {
        Err(_) => true,
        Ok(recovered) => recovered != u64::from(first) && recovered != u64::from(second),
    }
}
