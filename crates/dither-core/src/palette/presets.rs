//! Built-in palettes and palette-mode selection.
//!
//! | Mode | Colors | Source |
//! |------|--------|--------|
//! | Monochrome | 2 | black, white |
//! | Grayscale 4/8/16 | N | evenly spaced gray levels |
//! | CGA | 16 | IBM Color Graphics Adapter |
//! | Game Boy | 4 | original DMG green shades |
//! | PICO-8 | 16 | PICO-8 fantasy console |
//! | Custom | any | caller-supplied |

use std::fmt;
use std::str::FromStr;

use super::{Palette, PaletteError};
use crate::api::UnknownNameError;
use crate::color::Rgb;

const CGA: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(0, 0, 170),
    Rgb::new(0, 170, 0),
    Rgb::new(0, 170, 170),
    Rgb::new(170, 0, 0),
    Rgb::new(170, 0, 170),
    Rgb::new(170, 85, 0),
    Rgb::new(170, 170, 170),
    Rgb::new(85, 85, 85),
    Rgb::new(85, 85, 255),
    Rgb::new(85, 255, 85),
    Rgb::new(85, 255, 255),
    Rgb::new(255, 85, 85),
    Rgb::new(255, 85, 255),
    Rgb::new(255, 255, 85),
    Rgb::new(255, 255, 255),
];

const GAME_BOY: [Rgb; 4] = [
    Rgb::new(15, 56, 15),
    Rgb::new(48, 98, 48),
    Rgb::new(139, 172, 15),
    Rgb::new(155, 188, 15),
];

const PICO_8: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(95, 87, 79),
    Rgb::new(255, 0, 77),
    Rgb::new(171, 82, 54),
    Rgb::new(255, 163, 0),
    Rgb::new(255, 236, 39),
    Rgb::new(0, 228, 54),
    Rgb::new(41, 173, 255),
    Rgb::new(131, 118, 156),
    Rgb::new(255, 119, 168),
    Rgb::new(255, 204, 170),
    Rgb::new(41, 54, 111),
    Rgb::new(0, 87, 132),
    Rgb::new(194, 195, 199),
    Rgb::new(255, 241, 232),
    Rgb::new(242, 233, 222),
];

/// Which palette to dither to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteMode {
    /// Black and white
    #[default]
    Monochrome,
    /// 4 gray levels
    Grayscale4,
    /// 8 gray levels
    Grayscale8,
    /// 16 gray levels
    Grayscale16,
    /// 16-color CGA
    Cga,
    /// 4-shade Game Boy green
    GameBoy,
    /// 16-color PICO-8
    Pico8,
    /// Caller-supplied colors
    Custom,
}

impl PaletteMode {
    /// Every mode, in display order.
    pub const ALL: [PaletteMode; 8] = [
        PaletteMode::Monochrome,
        PaletteMode::Grayscale4,
        PaletteMode::Grayscale8,
        PaletteMode::Grayscale16,
        PaletteMode::Cga,
        PaletteMode::GameBoy,
        PaletteMode::Pico8,
        PaletteMode::Custom,
    ];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            PaletteMode::Monochrome => "Monochrome",
            PaletteMode::Grayscale4 => "Grayscale 4",
            PaletteMode::Grayscale8 => "Grayscale 8",
            PaletteMode::Grayscale16 => "Grayscale 16",
            PaletteMode::Cga => "CGA",
            PaletteMode::GameBoy => "Game Boy",
            PaletteMode::Pico8 => "PICO-8",
            PaletteMode::Custom => "Custom",
        }
    }

    /// Short identifier used on the command line and in preset files.
    pub fn slug(self) -> &'static str {
        match self {
            PaletteMode::Monochrome => "monochrome",
            PaletteMode::Grayscale4 => "gray4",
            PaletteMode::Grayscale8 => "gray8",
            PaletteMode::Grayscale16 => "gray16",
            PaletteMode::Cga => "cga",
            PaletteMode::GameBoy => "gameboy",
            PaletteMode::Pico8 => "pico8",
            PaletteMode::Custom => "custom",
        }
    }

    /// Parse a mode, falling back to [`PaletteMode::Monochrome`] for names
    /// that are not recognized.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|e: UnknownNameError| {
            tracing::warn!(%e, "Falling back to monochrome palette");
            PaletteMode::default()
        })
    }

    /// Colors of a built-in mode, or `None` for [`PaletteMode::Custom`].
    pub fn preset_colors(self) -> Option<Vec<Rgb>> {
        match self {
            PaletteMode::Monochrome => Some(vec![Rgb::BLACK, Rgb::WHITE]),
            PaletteMode::Grayscale4 => Some(grayscale_ramp(4)),
            PaletteMode::Grayscale8 => Some(grayscale_ramp(8)),
            PaletteMode::Grayscale16 => Some(grayscale_ramp(16)),
            PaletteMode::Cga => Some(CGA.to_vec()),
            PaletteMode::GameBoy => Some(GAME_BOY.to_vec()),
            PaletteMode::Pico8 => Some(PICO_8.to_vec()),
            PaletteMode::Custom => None,
        }
    }
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteMode {
    type Err = UnknownNameError;

    /// Accepts the slug or the display name, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PaletteMode::ALL
            .into_iter()
            .find(|m| m.slug().eq_ignore_ascii_case(wanted) || m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownNameError::new("palette", wanted))
    }
}

/// `n` evenly spaced gray levels from black to white, rounded.
fn grayscale_ramp(n: usize) -> Vec<Rgb> {
    let steps = (n.max(2) - 1) as f32;
    (0..n)
        .map(|i| Rgb::gray((i as f32 * 255.0 / steps).round() as u8))
        .collect()
}

/// Resolve a mode to a concrete palette.
///
/// `custom` is only consulted for [`PaletteMode::Custom`] and ignored for
/// every built-in mode.
///
/// # Errors
///
/// Returns [`PaletteError::Empty`] when the mode is `Custom` and `custom`
/// is `None` or empty.
pub fn get_palette(mode: PaletteMode, custom: Option<&[Rgb]>) -> Result<Palette, PaletteError> {
    match mode.preset_colors() {
        Some(colors) => Palette::new(colors),
        None => Palette::new(custom.map(<[Rgb]>::to_vec).unwrap_or_default()),
    }
}
