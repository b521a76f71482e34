//! Domain types for threshold secret sharing
//!
//! This module contains validated newtypes and the scheme configuration:
//! - [`Threshold`] - Minimum shares required for reconstruction (k >= 1)
//! - [`ShareCount`] - Total number of shares to create (n >= 1)
//! - [`ShareIndex`] - Share identifier, the x coordinate (x >= 1)
//! - [`ThresholdScheme`] - Validated (k, n) pair bound to a prime field

mod scheme;
mod share_count;
mod share_index;
mod threshold;

pub use scheme::ThresholdScheme;
pub use share_count::ShareCount;
pub use share_index::ShareIndex;
pub use threshold::Threshold;
