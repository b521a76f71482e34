//! Raw pixel buffers exchanged with the image decoding/encoding boundary

use serde::{Deserialize, Serialize};

use crate::error::{Result, SharingError};

/// Width and height of an image, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered by these dimensions
    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Channel layout of an interleaved 8-bit pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelLayout {
    Rgb,
    #[default]
    Rgba,
}

impl PixelLayout {
    #[must_use]
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// A rectangular, row-major, interleaved 8-bit pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    dimensions: Dimensions,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw pixel data
    ///
    /// # Errors
    /// Returns [`SharingError::DimensionMismatch`] if `data` does not hold exactly
    /// `width * height` pixels of the given layout
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharewise::pixels::{Dimensions, PixelBuffer, PixelLayout};
    ///
    /// let image = PixelBuffer::new(Dimensions::new(2, 1), PixelLayout::Rgb, vec![0; 6]).unwrap();
    /// assert_eq!(image.pixel_count(), 2);
    ///
    /// assert!(PixelBuffer::new(Dimensions::new(2, 2), PixelLayout::Rgb, vec![0; 6]).is_err());
    /// ```
    pub fn new(dimensions: Dimensions, layout: PixelLayout, data: Vec<u8>) -> Result<Self> {
        let channels = layout.channels() as u64;
        let expected = dimensions.pixel_count();
        let actual = data.len() as u64 / channels;

        if data.len() as u64 % channels != 0 || actual != expected {
            return Err(SharingError::DimensionMismatch { expected, actual });
        }

        Ok(Self {
            dimensions,
            layout,
            data,
        })
    }

    /// Builds an opaque RGBA image from grayscale levels
    ///
    /// # Errors
    /// Returns [`SharingError::DimensionMismatch`] if the level count is not `width * height`
    pub fn from_gray(dimensions: Dimensions, levels: &[u8]) -> Result<Self> {
        let data = levels
            .iter()
            .flat_map(|&gray| [gray, gray, gray, u8::MAX])
            .collect();
        Self::new(dimensions, PixelLayout::Rgba, data)
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[must_use]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / self.layout.channels()
    }

    /// Grayscale level of every pixel in row-major order
    ///
    /// Alpha, when present, is ignored.
    pub fn luminance(&self) -> impl ExactSizeIterator<Item = u8> + '_ {
        self.data
            .chunks_exact(self.layout.channels())
            .map(|pixel| luminance(pixel[0], pixel[1], pixel[2]))
    }
}

/// ITU-R BT.601 luma: `round(0.299 R + 0.587 G + 0.114 B)`
///
/// Computed in integer thousandths so that exact halves round up.
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let scaled = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    // The weights sum to 1000, so the rounded quotient is at most 255
    u8::try_from((scaled + 500) / 1000).unwrap_or(u8::MAX)
}
