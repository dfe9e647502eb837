//! Palette type and nearest-color lookup.

use std::str::FromStr;

use super::PaletteError;
use crate::color::Rgb;

/// An ordered, non-empty list of colors that output pixels are restricted to.
///
/// Order matters: when two entries are equally close to a query color, the
/// earlier one wins.
///
/// # Example
///
/// ```
/// use dither_core::{Palette, Rgb};
///
/// let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
/// assert_eq!(palette.nearest(Rgb::gray(200)), Rgb::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from a list of colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Empty`] if `colors` is empty.
    pub fn new(colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Create a palette from hex color strings (`#RRGGBB` or `#RGB`).
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] for the first unparsable entry,
    /// or [`PaletteError::Empty`] if the list is empty.
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .map(|s| {
                let s = s.as_ref();
                Rgb::from_str(s).map_err(|source| PaletteError::ParseColor {
                    input: s.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Number of colors in the palette. Always at least one.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; a palette cannot be constructed empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The palette entries in order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Whether `color` is one of the entries.
    #[inline]
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Index of the entry closest to `color` by squared RGB distance.
    #[inline]
    pub fn nearest_index(&self, color: Rgb) -> usize {
        nearest_index_in(&self.colors, color)
    }

    /// The entry closest to `color` by squared RGB distance.
    #[inline]
    pub fn nearest(&self, color: Rgb) -> Rgb {
        self.colors[self.nearest_index(color)]
    }
}

/// Linear scan with strict `<` so the first of several equidistant entries
/// is kept. `colors` must be non-empty.
fn nearest_index_in(colors: &[Rgb], color: Rgb) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, candidate) in colors.iter().enumerate() {
        let dist = color.distance_sq(*candidate);
        if dist < best_dist {
            best_dist = dist;
            best = i;
            if dist == 0 {
                break;
            }
        }
    }
    best
}

/// Find the entry of `palette` closest to `color`.
///
/// Works on any color slice; use [`Palette::nearest`] when a validated
/// palette is at hand.
///
/// # Errors
///
/// Returns [`PaletteError::Empty`] if `palette` has no entries.
pub fn closest_color(color: Rgb, palette: &[Rgb]) -> Result<Rgb, PaletteError> {
    closest_color_index(color, palette).map(|i| palette[i])
}

/// Like [`closest_color`] but returns the index of the entry.
pub fn closest_color_index(color: Rgb, palette: &[Rgb]) -> Result<usize, PaletteError> {
    if palette.is_empty() {
        return Err(PaletteError::Empty);
    }
    Ok(nearest_index_in(palette, color))
}
