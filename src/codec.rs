//! Plain-text persistence of share collections
//!
//! # Format
//!
//! The first line is a header. Text secrets write the unit count alone,
//! image secrets write `width height units`. Each unit follows as a line with
//! its share count and then that many `x y` lines, in generation order:
//!
//! ```text
//! 2
//! 3
//! 1 1038566121
//! 2 2077132170
//! 3 968214572
//! 3
//! 1 1771434930
//! 2 1395386108
//! 3 1019337286
//! ```
//!
//! All coordinates are decimal integers, so a round trip is exact.
//!
//! # Examples
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use sharewise::bytewise::share_text;
//! use sharewise::codec::{load, save};
//! use sharewise::domain::ThresholdScheme;
//! use sharewise::field::DEFAULT_MODULUS;
//!
//! let scheme = ThresholdScheme::from_parts(2, 3, DEFAULT_MODULUS).unwrap();
//! let shares = share_text("key", &scheme, &mut OsRng).unwrap();
//!
//! let text = save(&shares, None);
//! assert!(text.starts_with("3\n3\n1 "));
//!
//! let document = load(&text).unwrap();
//! assert_eq!(document.shares, shares);
//! assert_eq!(document.dimensions, None);
//! ```

use std::str::FromStr;

use crate::domain::ShareIndex;
use crate::error::{Result, SharingError};
use crate::pixels::Dimensions;
use crate::shares::{SecretShares, Share, ShareSet};

/// Upper bound on speculative allocation driven by counts read from untrusted input
const MAX_PREALLOCATION: usize = 4096;

/// A decoded share file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareDocument {
    pub shares: SecretShares,
    /// Present for image shares, absent for text shares
    pub dimensions: Option<Dimensions>,
}

/// Serialises share sets, with image dimensions when given
#[must_use]
pub fn save(shares: &SecretShares, dimensions: Option<Dimensions>) -> String {
    let mut out = match dimensions {
        Some(Dimensions { width, height }) => format!("{width} {height} {}\n", shares.len()),
        None => format!("{}\n", shares.len()),
    };

    for set in shares {
        out.push_str(&format!("{}\n", set.len()));
        for share in set {
            out.push_str(&format!("{share}\n"));
        }
    }

    out
}

/// Parses text produced by [`save`]
///
/// # Errors
/// Returns [`SharingError::Parse`] with the offending 1-based line for
/// non-integer tokens, wrong token counts, zero x coordinates, truncated
/// input, share counts that disagree with the lines present, and any
/// non-blank content after the declared body
pub fn load(text: &str) -> Result<ShareDocument> {
    let mut lines = Lines::new(text);

    let (line, header) = lines.next_record(|| "header".to_string())?;
    let (dimensions, unit_count) = match header.as_slice() {
        [units] => (None, parse_token::<usize>(line, units, "unit count")?),
        [width, height, units] => (
            Some(Dimensions::new(
                parse_token(line, width, "width")?,
                parse_token(line, height, "height")?,
            )),
            parse_token::<usize>(line, units, "unit count")?,
        ),
        other => {
            return Err(SharingError::parse(
                line,
                format!(
                    "header must be `units` or `width height units`, found {} fields",
                    other.len()
                ),
            ));
        }
    };

    let mut units = Vec::with_capacity(unit_count.min(MAX_PREALLOCATION));
    for unit in 0..unit_count {
        let (line, fields) = lines.next_record(|| format!("share count of unit {unit}"))?;
        let [count] = fields.as_slice() else {
            return Err(SharingError::parse(
                line,
                format!("expected the share count of unit {unit}, found {} fields", fields.len()),
            ));
        };
        let share_count: usize = parse_token(line, count, "share count")?;

        let mut shares = Vec::with_capacity(share_count.min(MAX_PREALLOCATION));
        for position in 0..share_count {
            let (line, fields) = lines.next_record(|| {
                format!("share {} of {share_count} for unit {unit}", position + 1)
            })?;
            let [x, y] = fields.as_slice() else {
                return Err(SharingError::parse(
                    line,
                    format!(
                        "unit {unit} declares {share_count} shares but line holds {} fields instead of `x y`",
                        fields.len()
                    ),
                ));
            };
            let x = ShareIndex::new(parse_token(line, x, "share x")?)
                .map_err(|_| SharingError::parse(line, "share x must be at least 1"))?;
            let y = parse_token(line, y, "share y")?;
            shares.push(Share::new(x, y));
        }
        units.push(ShareSet::new(shares));
    }

    lines.expect_end()?;

    Ok(ShareDocument {
        shares: SecretShares::new(units),
        dimensions,
    })
}

fn parse_token<T: FromStr>(line: usize, token: &str, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| SharingError::parse(line, format!("{what} `{token}` is not a valid integer")))
}

/// Line cursor that tracks 1-based line numbers
struct Lines<'a> {
    inner: std::str::Lines<'a>,
    consumed: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines(),
            consumed: 0,
        }
    }

    /// Next line split on whitespace; fails if the input ends first
    fn next_record(&mut self, expected: impl FnOnce() -> String) -> Result<(usize, Vec<&'a str>)> {
        let Some(line) = self.inner.next() else {
            return Err(SharingError::parse(
                self.consumed + 1,
                format!("unexpected end of input, expected {}", expected()),
            ));
        };
        self.consumed += 1;
        Ok((self.consumed, line.split_whitespace().collect()))
    }

    /// Only blank lines may follow the declared body
    fn expect_end(&mut self) -> Result<()> {
        for line in self.inner.by_ref() {
            self.consumed += 1;
            if !line.trim().is_empty() {
                return Err(SharingError::parse(
                    self.consumed,
                    "unexpected content after the declared shares",
                ));
            }
        }
        Ok(())
    }
}
