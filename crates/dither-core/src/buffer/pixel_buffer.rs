//! Owned RGB raster.

use thiserror::Error;

use crate::color::Rgb;

/// Error returned when pixel data does not match the stated dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Pixel count differs from `width * height`
    #[error("pixel count {actual} does not match {width}x{height} = {expected}")]
    LengthMismatch {
        /// Stated width
        width: usize,
        /// Stated height
        height: usize,
        /// `width * height`
        expected: usize,
        /// Pixels actually supplied
        actual: usize,
    },
}

/// A `width × height` grid of [`Rgb`] samples in row-major order.
///
/// Both the input and the output of a dithering pass. Zero-sized buffers
/// are allowed and pass through every algorithm unchanged.
///
/// # Example
///
/// ```
/// use dither_core::{PixelBuffer, Rgb};
///
/// let mut image = PixelBuffer::filled(2, 2, Rgb::gray(128));
/// image.set(1, 0, Rgb::WHITE);
///
/// assert_eq!(image.get(1, 0), Rgb::WHITE);
/// assert_eq!(image.to_rgb_bytes().len(), 2 * 2 * 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Pixels, one per cell, row-major order.
    pixels: Vec<Rgb>,
    /// Width in pixels.
    width: usize,
    /// Height in pixels.
    height: usize,
}

impl PixelBuffer {
    /// Create a buffer from existing pixels.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::LengthMismatch`] if `pixels.len()` is not
    /// `width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, BufferError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Create a buffer with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            pixels: vec![color; width * height],
            width,
            height,
        }
    }

    /// Wrap pixels the caller already sized to `width * height`.
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<Rgb>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Create a buffer from packed `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::LengthMismatch`] if `bytes.len()` is not
    /// `width * height * 3`.
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, BufferError> {
        if bytes.len() != width * height * 3 {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                expected: width * height,
                actual: bytes.len() / 3,
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Pack into `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// The returned buffer has length `width * height * 3`.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixels.len() * 3);
        for p in &self.pixels {
            rgb.extend_from_slice(&p.to_bytes());
        }
        rgb
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the buffer has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Consume the buffer and return its pixels.
    #[inline]
    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }

    /// Pixel at `(x, y)`. Panics when out of range.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Overwrite the pixel at `(x, y)`. Panics when out of range.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        self.pixels[y * self.width + x] = color;
    }

    /// Apply `f` to every pixel, producing a buffer of the same size.
    pub fn map<F: FnMut(Rgb) -> Rgb>(&self, f: F) -> Self {
        Self {
            pixels: self.pixels.iter().copied().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }
}
