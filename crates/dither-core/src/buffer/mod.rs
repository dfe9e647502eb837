//! Pixel storage.
//!
//! [`PixelBuffer`] is the raster type every stage consumes and produces:
//! preprocessing maps one buffer to another, and each dithering algorithm
//! returns a fresh buffer whose pixels are all palette entries.

mod pixel_buffer;

pub use pixel_buffer::{BufferError, PixelBuffer};
