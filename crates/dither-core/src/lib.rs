#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! dither-core: palette-restricted dithering
//!
//! This library reduces RGB images to a small palette with error diffusion,
//! ordered, noise, pattern and halftone dithering.
//!
//! # Quick Start
//!
//! [`dither`] is the one-shot entry point:
//!
//! ```
//! use dither_core::{dither, DitherAlgorithm, PaletteMode, Parameters, PixelBuffer, Rgb};
//!
//! let image = PixelBuffer::filled(8, 8, Rgb::new(120, 140, 90));
//! let params = Parameters::new()
//!     .algorithm(DitherAlgorithm::Atkinson)
//!     .palette_mode(PaletteMode::GameBoy);
//!
//! let result = dither(&image, &params).unwrap();
//! assert_eq!(result.width(), 8);
//! ```
//!
//! For many images with the same settings (video frames, batches), build a
//! [`Ditherer`] once and call [`Ditherer::dither`] per image. The palette and
//! threshold textures are then resolved a single time.
//!
//! # Pipeline
//!
//! ```text
//! PixelBuffer
//!     |
//!     v
//! Preprocessor      contrast, brightness, gamma, saturation (0..1 scale)
//!     |
//!     v
//! DitherAlgorithm   error diffusion | threshold offset | carried error
//!     |             (reads ThresholdMap for Bayer and blue noise)
//!     v
//! Palette::nearest  squared RGB distance, earliest entry wins ties
//!     |
//!     v
//! PixelBuffer       every pixel is a palette color
//! ```
//!
//! # Determinism
//!
//! Output is a pure function of the image and the [`Parameters`]. Seeded
//! algorithms (blue noise, white noise, random, variable error diffusion)
//! draw from a generator seeded with [`Parameters::seed`], and no state
//! survives between calls.
//!
//! # Parameter handling
//!
//! Out-of-range parameters never fail a call. They are clamped by
//! [`Parameters::normalized`] and each adjustment is logged with `tracing`.
//! The only error is a palette that cannot be resolved
//! ([`DitherError::InvalidPalette`]).

pub mod api;
pub mod buffer;
pub mod color;
pub mod dither;
pub mod palette;
pub mod params;
pub mod preprocess;
pub mod texture;


pub use api::{dither, DitherError, Ditherer, UnknownNameError};
pub use buffer::{BufferError, PixelBuffer};
pub use color::Rgb;
pub use dither::{DitherAlgorithm, Kernel};
pub use palette::{
    closest_color, closest_color_index, get_palette, Palette, PaletteError, PaletteMode,
    ParseColorError,
};
pub use params::{Parameters, DEFAULT_SEED};
pub use preprocess::{preprocess, Preprocessor};
pub use texture::{generate_bayer_matrix, generate_blue_noise, ThresholdMap};
