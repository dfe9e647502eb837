//! Palettes and nearest-color quantization.
//!
//! A [`Palette`] is an ordered, non-empty list of [`Rgb`](crate::Rgb)
//! colors. Every dithering algorithm maps its adjusted pixel to a palette
//! entry through [`Palette::nearest`], which compares squared RGB distance
//! and keeps the earliest entry on ties.
//!
//! [`get_palette`] resolves a [`PaletteMode`] (one of the built-in presets
//! or a custom list) to a concrete palette.

mod error;
mod palette;
mod presets;

pub use error::{PaletteError, ParseColorError};
pub use palette::{closest_color, closest_color_index, Palette};
pub use presets::{get_palette, PaletteMode};
