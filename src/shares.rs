//! Share containers
//!
//! A [`Share`] is one point `(x, f(x))`. A [`ShareSet`] holds the points
//! produced from a single polynomial, and [`SecretShares`] keeps one share set
//! per secret unit in position order.

use std::fmt;

use crate::domain::ShareIndex;

/// One point on a sharing polynomial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Share {
    x: ShareIndex,
    y: u64,
}

impl Share {
    #[must_use]
    pub fn new(x: ShareIndex, y: u64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn x(&self) -> ShareIndex {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> u64 {
        self.y
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// The shares of a single secret unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareSet(Vec<Share>);

impl ShareSet {
    #[must_use]
    pub fn new(shares: Vec<Share>) -> Self {
        Self(shares)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Share] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Share> {
        self.0.iter()
    }

    /// Keeps only the shares held by `participants`, in the participants' order
    ///
    /// Participants without a share in this set are skipped.
    #[must_use]
    pub fn select(&self, participants: &[ShareIndex]) -> Self {
        Self(
            participants
                .iter()
                .filter_map(|x| self.0.iter().find(|share| share.x == *x).copied())
                .collect(),
        )
    }
}

impl From<Vec<Share>> for ShareSet {
    fn from(shares: Vec<Share>) -> Self {
        Self(shares)
    }
}

impl<'a> IntoIterator for &'a ShareSet {
    type Item = &'a Share;
    type IntoIter = std::slice::Iter<'a, Share>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Share sets for every unit of a byte-wise secret, in position order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretShares(Vec<ShareSet>);

impl SecretShares {
    #[must_use]
    pub fn new(units: Vec<ShareSet>) -> Self {
        Self(units)
    }

    #[must_use]
    pub fn units(&self) -> &[ShareSet] {
        &self.0
    }

    /// Number of secret units (characters' bytes or pixels)
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShareSet> {
        self.0.iter()
    }

    /// Restricts every unit to the shares held by `participants`
    #[must_use]
    pub fn select(&self, participants: &[ShareIndex]) -> Self {
        Self(self.0.iter().map(|set| set.select(participants)).collect())
    }

    /// Extracts the shares of a single participant, one per unit
    ///
    /// Returns `None` if any unit lacks a share for `participant`.
    #[must_use]
    pub fn participant(&self, participant: ShareIndex) -> Option<Self> {
        self.0
            .iter()
            .map(|set| {
                let selected = set.select(&[participant]);
                (!selected.is_empty()).then_some(selected)
            })
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }
}

impl From<Vec<ShareSet>> for SecretShares {
    fn from(units: Vec<ShareSet>) -> Self {
        Self(units)
    }
}

impl<'a> IntoIterator for &'a SecretShares {
    type Item = &'a ShareSet;
    type IntoIter = std::slice::Iter<'a, ShareSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
