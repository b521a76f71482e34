//! (k, n) threshold secret sharing for text and grayscale images
//!
//! Secrets are split byte by byte (or pixel by pixel) over a prime field:
//! every unit becomes the constant term of its own random polynomial, and any
//! `k` of the `n` evaluation points recover it through Lagrange interpolation.
//!
//! Layers, leaves first:
//! - [`field`] - modular arithmetic over the prime modulus
//! - [`polynomial`] - random polynomials hiding one secret value
//! - [`engine`] - share generation and reconstruction for one value
//! - [`bytewise`] - per-byte sharing of text and per-pixel sharing of images
//! - [`codec`] - the plain-text share file format
//! - [`commands`] - application entry points used by the CLI and WASM bindings

pub mod bytewise;
pub mod codec;
pub mod commands;
pub mod domain;
pub mod engine;
pub mod error;
pub mod field;
pub mod pixels;
pub mod polynomial;
pub mod shares;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{Result, SharingError};
