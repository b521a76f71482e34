use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::SchemeParams;
use crate::domain::{ShareCount, ShareIndex, Threshold};
use crate::field::DEFAULT_MODULUS;
use crate::pixels::PixelLayout;

/// Validates that threshold is at least 1
fn validate_threshold(s: &str) -> Result<Threshold, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    Threshold::new(value).map_err(|e| e.to_string())
}

fn validate_share_count(s: &str) -> Result<ShareCount, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    ShareCount::new(value).map_err(|e| e.to_string())
}

/// Validates a share holder id (the x coordinate, at least 1)
fn validate_share_index(s: &str) -> Result<ShareIndex, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    ShareIndex::new(value).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "sharewise")]
#[command(about = "Split text or grayscale images into (k, n) threshold secret shares")]
pub struct Cli {
    /// Prime modulus of the field shares are computed in
    #[arg(long, global = true, default_value_t = DEFAULT_MODULUS)]
    pub modulus: u64,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Copy)]
pub struct SchemeArgs {
    /// Threshold: minimum number of shares needed to reconstruct
    #[arg(short, long, value_parser = validate_threshold)]
    pub threshold: Threshold,

    /// Number of shares to create
    #[arg(short, long, value_parser = validate_share_count)]
    pub shares: ShareCount,
}

impl SchemeArgs {
    /// Request parameters over the field selected by `--modulus`
    #[must_use]
    pub fn params(&self, modulus: u64) -> SchemeParams {
        SchemeParams {
            threshold: *self.threshold,
            shares: *self.shares,
            modulus,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    Rgb,
    Rgba,
}

impl From<LayoutArg> for PixelLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Rgb => Self::Rgb,
            LayoutArg::Rgba => Self::Rgba,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a text secret read from stdin into shares
    SplitText {
        #[command(flatten)]
        scheme: SchemeArgs,

        /// File to write the shares to (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a JSON summary to stderr
        #[arg(long)]
        json: bool,
    },
    /// Combine text shares to reconstruct the original secret
    CombineText {
        #[command(flatten)]
        scheme: SchemeArgs,

        /// Share file to read (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Share holders to combine, e.g. `2,5,3` (all stored shares when omitted)
        #[arg(short, long, value_delimiter = ',', value_parser = validate_share_index)]
        participants: Vec<ShareIndex>,
    },
    /// Split the grayscale levels of a raw pixel buffer into shares
    SplitImage {
        #[command(flatten)]
        scheme: SchemeArgs,

        /// Image width in pixels
        #[arg(long)]
        width: u32,

        /// Image height in pixels
        #[arg(long)]
        height: u32,

        /// Channel layout of the raw input
        #[arg(long, value_enum, default_value_t = LayoutArg::Rgba)]
        layout: LayoutArg,

        /// Raw interleaved 8-bit pixel file, row-major
        #[arg(short, long)]
        input: PathBuf,

        /// File to write the shares to (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a JSON summary to stderr
        #[arg(long)]
        json: bool,
    },
    /// Combine image shares into a raw grayscale RGBA pixel file
    CombineImage {
        #[command(flatten)]
        scheme: SchemeArgs,

        /// Share file to read (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Raw RGBA file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Share holders to combine, e.g. `2,5,3` (all stored shares when omitted)
        #[arg(short, long, value_delimiter = ',', value_parser = validate_share_index)]
        participants: Vec<ShareIndex>,
    },
}
