//! Dithering parameters.
//!
//! [`Parameters`] bundles everything a dithering pass needs: the algorithm,
//! the palette selection, preprocessing adjustments and algorithm knobs.
//! Values are plain public fields with chainable setters. Nothing is
//! validated on assignment; [`Parameters::normalized`] clamps every field
//! into its legal range (logging a warning for each change) and is applied
//! once at the start of every dithering pass.

use crate::color::Rgb;
use crate::dither::DitherAlgorithm;
use crate::palette::PaletteMode;

/// Seed used for every seeded algorithm unless overridden.
pub const DEFAULT_SEED: u64 = 42;

/// Legal Bayer matrix sizes.
pub const BAYER_SIZES: [usize; 4] = [2, 4, 8, 16];

/// Full set of options for one dithering pass.
///
/// # Defaults
///
/// | Field | Default | Range |
/// |-------|---------|-------|
/// | `strength` | 1.0 | 0..=2 |
/// | `serpentine` | true | |
/// | `gamma` | 1.0 | 0.1..=3 |
/// | `contrast` | 1.0 | 0..=3 |
/// | `brightness` | 0.0 | -1..=1 |
/// | `saturation` | 1.0 | 0..=2 |
/// | `bayer_size` | 8 | 2, 4, 8, 16 |
/// | `seed` | 42 | |
/// | `pattern_scale` | 2 | 2..=64 |
///
/// # Example
///
/// ```
/// use dither_core::{DitherAlgorithm, PaletteMode, Parameters};
///
/// let params = Parameters::new()
///     .algorithm(DitherAlgorithm::Atkinson)
///     .palette_mode(PaletteMode::GameBoy)
///     .strength(0.8)
///     .contrast(1.2);
/// assert_eq!(params.algorithm, DitherAlgorithm::Atkinson);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// Dithering algorithm.
    pub algorithm: DitherAlgorithm,

    /// Palette selection.
    pub palette_mode: PaletteMode,

    /// Colors used when `palette_mode` is [`PaletteMode::Custom`].
    pub custom_palette: Option<Vec<Rgb>>,

    /// Scales diffused error, threshold offsets and noise amplitude.
    ///
    /// 0 disables the dither pattern entirely; values above 1 exaggerate it.
    pub strength: f32,

    /// Alternate scan direction on odd rows.
    ///
    /// Only Floyd-Steinberg consults this; Riemersma always scans
    /// serpentine and every other kernel always scans left to right.
    pub serpentine: bool,

    /// Power curve applied during preprocessing (1 = unchanged).
    pub gamma: f32,

    /// Multiplier applied during preprocessing (1 = unchanged).
    pub contrast: f32,

    /// Offset added during preprocessing on the 0..1 scale (0 = unchanged).
    pub brightness: f32,

    /// Saturation multiplier applied during preprocessing (1 = unchanged).
    pub saturation: f32,

    /// Side length of the Bayer matrix.
    ///
    /// The sized Bayer algorithms overwrite this with their own size during
    /// [`normalized`](Parameters::normalized).
    pub bayer_size: usize,

    /// Seed for noise generation and randomized weights.
    pub seed: u64,

    /// Cell size in pixels for the halftone variants.
    pub pattern_scale: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            algorithm: DitherAlgorithm::default(),
            palette_mode: PaletteMode::default(),
            custom_palette: None,
            strength: 1.0,
            serpentine: true,
            gamma: 1.0,
            contrast: 1.0,
            brightness: 0.0,
            saturation: 1.0,
            bayer_size: 8,
            seed: DEFAULT_SEED,
            pattern_scale: 2,
        }
    }
}

impl Parameters {
    /// Create parameters with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dithering algorithm.
    #[inline]
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the palette mode.
    #[inline]
    pub fn palette_mode(mut self, mode: PaletteMode) -> Self {
        self.palette_mode = mode;
        self
    }

    /// Use a custom palette. Also switches the mode to [`PaletteMode::Custom`].
    #[inline]
    pub fn custom_palette(mut self, colors: Vec<Rgb>) -> Self {
        self.palette_mode = PaletteMode::Custom;
        self.custom_palette = Some(colors);
        self
    }

    /// Set dithering strength.
    #[inline]
    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    /// Enable or disable serpentine scanning.
    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.serpentine = enabled;
        self
    }

    /// Set the gamma exponent.
    #[inline]
    pub fn gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the contrast multiplier.
    #[inline]
    pub fn contrast(mut self, contrast: f32) -> Self {
        self.contrast = contrast;
        self
    }

    /// Set the brightness offset.
    #[inline]
    pub fn brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    /// Set the saturation multiplier.
    #[inline]
    pub fn saturation(mut self, saturation: f32) -> Self {
        self.saturation = saturation;
        self
    }

    /// Set the Bayer matrix size.
    #[inline]
    pub fn bayer_size(mut self, size: usize) -> Self {
        self.bayer_size = size;
        self
    }

    /// Set the random seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the halftone cell size.
    #[inline]
    pub fn pattern_scale(mut self, scale: u32) -> Self {
        self.pattern_scale = scale;
        self
    }

    /// Return a copy with every field clamped into its legal range.
    ///
    /// Non-finite floats fall back to the field default. The sized Bayer
    /// variants force their own `bayer_size`. Each adjustment is logged at
    /// `warn` level.
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();
        let mut out = self.clone();

        out.strength = clamp_field("strength", self.strength, 0.0, 2.0, defaults.strength);
        out.gamma = clamp_field("gamma", self.gamma, 0.1, 3.0, defaults.gamma);
        out.contrast = clamp_field("contrast", self.contrast, 0.0, 3.0, defaults.contrast);
        out.brightness = clamp_field(
            "brightness",
            self.brightness,
            -1.0,
            1.0,
            defaults.brightness,
        );
        out.saturation = clamp_field(
            "saturation",
            self.saturation,
            0.0,
            2.0,
            defaults.saturation,
        );

        out.bayer_size = match self.algorithm.bayer_size() {
            Some(size) => size,
            None => {
                let size = nearest_bayer_size(self.bayer_size);
                if size != self.bayer_size {
                    tracing::warn!(
                        requested = self.bayer_size,
                        applied = size,
                        "Adjusted bayer_size"
                    );
                }
                size
            }
        };

        let pattern_scale = self.pattern_scale.clamp(2, 64);
        if pattern_scale != self.pattern_scale {
            tracing::warn!(
                requested = self.pattern_scale,
                applied = pattern_scale,
                "Clamped pattern_scale"
            );
        }
        out.pattern_scale = pattern_scale;

        out
    }
}

fn clamp_field(name: &'static str, value: f32, min: f32, max: f32, default: f32) -> f32 {
    let applied = if value.is_finite() {
        value.clamp(min, max)
    } else {
        default
    };
    if applied.to_bits() != value.to_bits() {
        tracing::warn!(parameter = name, requested = value, applied, "Clamped parameter");
    }
    applied
}

/// Closest legal Bayer size; ties go to the smaller size.
pub fn nearest_bayer_size(size: usize) -> usize {
    BAYER_SIZES
        .into_iter()
        .min_by_key(|&candidate| candidate.abs_diff(size))
        .unwrap_or(8)
}
