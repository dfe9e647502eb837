//! Dithering algorithms.
//!
//! Two families share one quantization primitive,
//! [`Palette::nearest`](crate::Palette::nearest):
//!
//! - **Error diffusion** scans the image in order and pushes each pixel's
//!   quantization error onto neighbors that have not been visited yet.
//!   Output depends on scan order. See [`kernel`] for the weight tables.
//! - **Threshold** algorithms offset every pixel by a position-dependent
//!   amount taken from a Bayer matrix, a noise field or a fixed pattern.
//!   Pixels are independent of each other.
//!
//! Riemersma sits between the two: it carries a single decaying error from
//! one pixel to the next instead of spreading it over a kernel.
//!
//! # Scan order
//!
//! Floyd-Steinberg is the only kernel that honors
//! [`Parameters::serpentine`](crate::Parameters::serpentine). On reversed
//! rows the kernel is mirrored so error still flows toward unvisited pixels.
//! Riemersma always runs serpentine; everything else runs left to right.

pub(crate) mod diffusion;
mod dot_diffusion;
mod gradient;
pub mod kernel;
mod ordered;
mod riemersma;

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::api::UnknownNameError;
use crate::buffer::PixelBuffer;
use crate::palette::Palette;
use crate::params::Parameters;
use crate::texture::{generate_bayer_matrix, generate_blue_noise, ThresholdMap};

use diffusion::Modulation;
pub use diffusion::DiffusionStats;
pub use kernel::Kernel;

/// Side length of the tiled blue-noise texture.
pub const BLUE_NOISE_SIZE: usize = 256;

/// Dithering algorithm selection.
///
/// The first 24 variants are the core set; the next five are threshold
/// and kernel variants that round out the halftone family. [`Ordered`]
/// is Bayer dithering at [`Parameters::bayer_size`].
///
/// [`Ordered`]: DitherAlgorithm::Ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherAlgorithm {
    /// Floyd-Steinberg error diffusion (the fallback for unknown names).
    #[default]
    FloydSteinberg,
    /// Atkinson error diffusion, 75% propagation.
    Atkinson,
    /// Jarvis-Judice-Ninke, 12 neighbors over three rows.
    JarvisJudiceNinke,
    /// Stucki, JJN footprint with sharper weights.
    Stucki,
    /// Burkes, two-row Stucki.
    Burkes,
    /// Sierra (three rows).
    Sierra,
    /// Sierra two-row.
    SierraTwoRow,
    /// Sierra Lite, three neighbors.
    SierraLite,
    /// Ordered dithering with a 2x2 Bayer matrix.
    OrderedBayer2x2,
    /// Ordered dithering with a 4x4 Bayer matrix.
    OrderedBayer4x4,
    /// Ordered dithering with an 8x8 Bayer matrix.
    OrderedBayer8x8,
    /// Ordered dithering with a 16x16 Bayer matrix.
    OrderedBayer16x16,
    /// Threshold offsets from a tiled 256x256 seeded blue-noise field.
    BlueNoise,
    /// Threshold offsets from a fresh seeded uniform draw per pixel.
    WhiteNoise,
    /// Same output as [`WhiteNoise`](DitherAlgorithm::WhiteNoise).
    Random,
    /// Fixed 4x4 threshold pattern.
    Pattern,
    /// Threshold perturbation by an 8x8 class matrix.
    DotDiffusion,
    /// Single decaying error carried along a serpentine path.
    Riemersma,
    /// Floyd-Steinberg with strength raised along edges.
    GradientBased,
    /// Floyd-Steinberg with randomly jittered weights.
    VariableErrorDiffusion,
    /// Floyd-Steinberg with intensity-dependent forward weights.
    Ostromoukhov,
    /// Fan error diffusion.
    Fan,
    /// Shiau-Fan error diffusion.
    ShiauFan,
    /// Steven Pigeon error diffusion.
    StevenPigeon,
    /// Plain nearest color with no dither offset.
    Threshold,
    /// 4x4 clustered-dot threshold pattern.
    ClusteredDot,
    /// Round halftone dots in cells of `pattern_scale` pixels.
    HalftoneCircle,
    /// Diamond halftone dots in cells of `pattern_scale` pixels.
    HalftoneDiamond,
    /// Three-neighbor "false" Floyd-Steinberg.
    FalseFloydSteinberg,
    /// Ordered dithering with a Bayer matrix of `bayer_size`.
    Ordered,
}

impl DitherAlgorithm {
    /// Every algorithm, in listing order.
    pub const ALL: [DitherAlgorithm; 30] = [
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::Atkinson,
        DitherAlgorithm::JarvisJudiceNinke,
        DitherAlgorithm::Stucki,
        DitherAlgorithm::Burkes,
        DitherAlgorithm::Sierra,
        DitherAlgorithm::SierraTwoRow,
        DitherAlgorithm::SierraLite,
        DitherAlgorithm::OrderedBayer2x2,
        DitherAlgorithm::OrderedBayer4x4,
        DitherAlgorithm::OrderedBayer8x8,
        DitherAlgorithm::OrderedBayer16x16,
        DitherAlgorithm::BlueNoise,
        DitherAlgorithm::WhiteNoise,
        DitherAlgorithm::Random,
        DitherAlgorithm::Pattern,
        DitherAlgorithm::DotDiffusion,
        DitherAlgorithm::Riemersma,
        DitherAlgorithm::GradientBased,
        DitherAlgorithm::VariableErrorDiffusion,
        DitherAlgorithm::Ostromoukhov,
        DitherAlgorithm::Fan,
        DitherAlgorithm::ShiauFan,
        DitherAlgorithm::StevenPigeon,
        DitherAlgorithm::Threshold,
        DitherAlgorithm::ClusteredDot,
        DitherAlgorithm::HalftoneCircle,
        DitherAlgorithm::HalftoneDiamond,
        DitherAlgorithm::FalseFloydSteinberg,
        DitherAlgorithm::Ordered,
    ];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "Floyd-Steinberg",
            DitherAlgorithm::Atkinson => "Atkinson",
            DitherAlgorithm::JarvisJudiceNinke => "Jarvis-Judice-Ninke",
            DitherAlgorithm::Stucki => "Stucki",
            DitherAlgorithm::Burkes => "Burkes",
            DitherAlgorithm::Sierra => "Sierra",
            DitherAlgorithm::SierraTwoRow => "Sierra Two-Row",
            DitherAlgorithm::SierraLite => "Sierra Lite",
            DitherAlgorithm::OrderedBayer2x2 => "Ordered Bayer 2x2",
            DitherAlgorithm::OrderedBayer4x4 => "Ordered Bayer 4x4",
            DitherAlgorithm::OrderedBayer8x8 => "Ordered Bayer 8x8",
            DitherAlgorithm::OrderedBayer16x16 => "Ordered Bayer 16x16",
            DitherAlgorithm::BlueNoise => "Blue Noise",
            DitherAlgorithm::WhiteNoise => "White Noise",
            DitherAlgorithm::Random => "Random",
            DitherAlgorithm::Pattern => "Pattern",
            DitherAlgorithm::DotDiffusion => "Dot Diffusion",
            DitherAlgorithm::Riemersma => "Riemersma",
            DitherAlgorithm::GradientBased => "Gradient-Based",
            DitherAlgorithm::VariableErrorDiffusion => "Variable Error Diffusion",
            DitherAlgorithm::Ostromoukhov => "Ostromoukhov",
            DitherAlgorithm::Fan => "Fan",
            DitherAlgorithm::ShiauFan => "Shiau-Fan",
            DitherAlgorithm::StevenPigeon => "Steven Pigeon",
            DitherAlgorithm::Threshold => "Threshold",
            DitherAlgorithm::ClusteredDot => "Clustered Dot",
            DitherAlgorithm::HalftoneCircle => "Halftone Circle",
            DitherAlgorithm::HalftoneDiamond => "Halftone Diamond",
            DitherAlgorithm::FalseFloydSteinberg => "False Floyd-Steinberg",
            DitherAlgorithm::Ordered => "Ordered Bayer",
        }
    }

    /// Short identifier used on the command line and in preset files.
    pub fn slug(self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "floyd-steinberg",
            DitherAlgorithm::Atkinson => "atkinson",
            DitherAlgorithm::JarvisJudiceNinke => "jarvis",
            DitherAlgorithm::Stucki => "stucki",
            DitherAlgorithm::Burkes => "burkes",
            DitherAlgorithm::Sierra => "sierra",
            DitherAlgorithm::SierraTwoRow => "sierra-two",
            DitherAlgorithm::SierraLite => "sierra-lite",
            DitherAlgorithm::OrderedBayer2x2 => "bayer-2x2",
            DitherAlgorithm::OrderedBayer4x4 => "bayer-4x4",
            DitherAlgorithm::OrderedBayer8x8 => "bayer-8x8",
            DitherAlgorithm::OrderedBayer16x16 => "bayer-16x16",
            DitherAlgorithm::BlueNoise => "blue-noise",
            DitherAlgorithm::WhiteNoise => "white-noise",
            DitherAlgorithm::Random => "random",
            DitherAlgorithm::Pattern => "pattern",
            DitherAlgorithm::DotDiffusion => "dot-diffusion",
            DitherAlgorithm::Riemersma => "riemersma",
            DitherAlgorithm::GradientBased => "gradient",
            DitherAlgorithm::VariableErrorDiffusion => "variable",
            DitherAlgorithm::Ostromoukhov => "ostromoukhov",
            DitherAlgorithm::Fan => "fan",
            DitherAlgorithm::ShiauFan => "shiau-fan",
            DitherAlgorithm::StevenPigeon => "steven-pigeon",
            DitherAlgorithm::Threshold => "threshold",
            DitherAlgorithm::ClusteredDot => "clustered-dot",
            DitherAlgorithm::HalftoneCircle => "halftone-circle",
            DitherAlgorithm::HalftoneDiamond => "halftone-diamond",
            DitherAlgorithm::FalseFloydSteinberg => "false-floyd-steinberg",
            DitherAlgorithm::Ordered => "bayer",
        }
    }

    /// Parse an algorithm, falling back to Floyd-Steinberg for names that
    /// are not recognized.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|e: UnknownNameError| {
            tracing::warn!(%e, "Falling back to Floyd-Steinberg");
            DitherAlgorithm::default()
        })
    }

    /// Matrix size for the sized Bayer variants.
    ///
    /// `None` for [`Ordered`](DitherAlgorithm::Ordered), which takes its size
    /// from the parameters.
    pub fn bayer_size(self) -> Option<usize> {
        match self {
            DitherAlgorithm::OrderedBayer2x2 => Some(2),
            DitherAlgorithm::OrderedBayer4x4 => Some(4),
            DitherAlgorithm::OrderedBayer8x8 => Some(8),
            DitherAlgorithm::OrderedBayer16x16 => Some(16),
            _ => None,
        }
    }

    /// The fixed kernel for plain error-diffusion algorithms.
    ///
    /// `None` for threshold algorithms and for the diffusion variants that
    /// adjust weights or strength per pixel.
    pub fn kernel(self) -> Option<&'static Kernel> {
        match self {
            DitherAlgorithm::FloydSteinberg => Some(&kernel::FLOYD_STEINBERG),
            DitherAlgorithm::Atkinson => Some(&kernel::ATKINSON),
            DitherAlgorithm::JarvisJudiceNinke => Some(&kernel::JARVIS_JUDICE_NINKE),
            DitherAlgorithm::Stucki => Some(&kernel::STUCKI),
            DitherAlgorithm::Burkes => Some(&kernel::BURKES),
            DitherAlgorithm::Sierra => Some(&kernel::SIERRA),
            DitherAlgorithm::SierraTwoRow => Some(&kernel::SIERRA_TWO_ROW),
            DitherAlgorithm::SierraLite => Some(&kernel::SIERRA_LITE),
            DitherAlgorithm::Fan => Some(&kernel::FAN),
            DitherAlgorithm::ShiauFan => Some(&kernel::SHIAU_FAN),
            DitherAlgorithm::StevenPigeon => Some(&kernel::STEVEN_PIGEON),
            DitherAlgorithm::FalseFloydSteinberg => Some(&kernel::FALSE_FLOYD_STEINBERG),
            _ => None,
        }
    }

    /// Whether the serpentine flag changes this algorithm's output.
    pub fn honors_serpentine(self) -> bool {
        self == DitherAlgorithm::FloydSteinberg
    }

    /// Whether `seed` changes this algorithm's output.
    pub fn uses_seed(self) -> bool {
        matches!(
            self,
            DitherAlgorithm::BlueNoise
                | DitherAlgorithm::WhiteNoise
                | DitherAlgorithm::Random
                | DitherAlgorithm::VariableErrorDiffusion
        )
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitherAlgorithm {
    type Err = UnknownNameError;

    /// Accepts the slug or the display name, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DitherAlgorithm::ALL
            .into_iter()
            .find(|a| a.slug().eq_ignore_ascii_case(wanted) || a.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownNameError::new("algorithm", wanted))
    }
}

/// Rolling window of accumulated error rows.
///
/// Only the rows a kernel can reach are kept: `rows[0]` is the row being
/// scanned, `rows[1]` the next one, and so on. Kernels never write upward,
/// so a row can be recycled as soon as the scan leaves it.
#[derive(Debug)]
pub(crate) struct ErrorBuffer {
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a buffer `row_depth` rows deep (a kernel's `max_dy + 1`).
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth.max(1)).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    /// Error accumulated so far for column `x` of the current row.
    #[inline]
    pub fn get(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add `error` to column `x`, `row_offset` rows below the current one.
    ///
    /// Silently ignores targets outside the window.
    #[inline]
    pub fn add(&mut self, x: usize, row_offset: usize, error: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            let cell = &mut self.rows[row_offset][x];
            for c in 0..3 {
                cell[c] += error[c];
            }
        }
    }

    /// Move the window down one row, zeroing the newly exposed row.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}

/// Build the threshold texture an algorithm reads, if any.
///
/// Expects normalized parameters. The result can be reused for every image
/// dithered with the same parameters.
pub(crate) fn texture_for(params: &Parameters) -> Option<ThresholdMap> {
    match params.algorithm {
        DitherAlgorithm::OrderedBayer2x2
        | DitherAlgorithm::OrderedBayer4x4
        | DitherAlgorithm::OrderedBayer8x8
        | DitherAlgorithm::OrderedBayer16x16
        | DitherAlgorithm::Ordered => Some(generate_bayer_matrix(params.bayer_size)),
        DitherAlgorithm::BlueNoise => Some(generate_blue_noise(BLUE_NOISE_SIZE, params.seed)),
        _ => None,
    }
}

/// Run the selected algorithm on an already preprocessed image.
///
/// `texture` is the map from [`texture_for`]; it is rebuilt when missing.
pub(crate) fn apply(
    image: &PixelBuffer,
    palette: &Palette,
    params: &Parameters,
    texture: Option<&ThresholdMap>,
) -> PixelBuffer {
    let algorithm = params.algorithm;
    let strength = params.strength;

    if let Some(kernel) = algorithm.kernel() {
        let serpentine = params.serpentine && algorithm.honors_serpentine();
        let (output, stats) =
            diffusion::error_diffusion(image, palette, kernel, strength, serpentine, Modulation::Fixed);
        tracing::trace!(
            algorithm = algorithm.name(),
            dropped = stats.dropped_fraction(),
            "Error diffusion finished"
        );
        return output;
    }

    let fs = &kernel::FLOYD_STEINBERG;
    match algorithm {
        DitherAlgorithm::Ostromoukhov => {
            diffusion::error_diffusion(image, palette, fs, strength, false, Modulation::Intensity).0
        }
        DitherAlgorithm::VariableErrorDiffusion => {
            let rng = StdRng::seed_from_u64(params.seed);
            diffusion::error_diffusion(image, palette, fs, strength, false, Modulation::Jitter(rng))
                .0
        }
        DitherAlgorithm::GradientBased => {
            let edges = gradient::edge_magnitude(image);
            diffusion::error_diffusion(
                image,
                palette,
                fs,
                strength,
                false,
                Modulation::EdgeStrength(&edges),
            )
            .0
        }
        DitherAlgorithm::OrderedBayer2x2
        | DitherAlgorithm::OrderedBayer4x4
        | DitherAlgorithm::OrderedBayer8x8
        | DitherAlgorithm::OrderedBayer16x16
        | DitherAlgorithm::Ordered => match texture {
            Some(map) => ordered::textured(image, palette, map, strength),
            None => ordered::textured(
                image,
                palette,
                &generate_bayer_matrix(params.bayer_size),
                strength,
            ),
        },
        DitherAlgorithm::BlueNoise => match texture {
            Some(map) => ordered::textured(image, palette, map, strength),
            None => ordered::textured(
                image,
                palette,
                &generate_blue_noise(BLUE_NOISE_SIZE, params.seed),
                strength,
            ),
        },
        DitherAlgorithm::WhiteNoise | DitherAlgorithm::Random => {
            ordered::white_noise(image, palette, params.seed, strength)
        }
        DitherAlgorithm::Pattern => ordered::pattern(image, palette, strength),
        DitherAlgorithm::DotDiffusion => dot_diffusion::dot_diffusion(image, palette, strength),
        DitherAlgorithm::Riemersma => riemersma::riemersma(image, palette, strength),
        DitherAlgorithm::Threshold => ordered::threshold(image, palette),
        DitherAlgorithm::ClusteredDot => ordered::clustered_dot(image, palette, strength),
        DitherAlgorithm::HalftoneCircle => {
            ordered::halftone_circle(image, palette, params.pattern_scale, strength)
        }
        DitherAlgorithm::HalftoneDiamond => {
            ordered::halftone_diamond(image, palette, params.pattern_scale, strength)
        }
        // Every plain kernel returned above.
        _ => diffusion::error_diffusion(image, palette, fs, strength, params.serpentine, Modulation::Fixed).0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_error_buffer_new() {
        let buf = ErrorBuffer::new(10, 3);
        assert_eq!(buf.rows.len(), 3);
        assert_eq!(buf.get(9), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_error_buffer_add_and_advance() {
        let mut buf = ErrorBuffer::new(4, 2);
        buf.add(1, 0, [1.0, 2.0, 3.0]);
        buf.add(1, 0, [1.0, 0.0, 0.0]);
        buf.add(2, 1, [5.0, 5.0, 5.0]);
        assert_eq!(buf.get(1), [2.0, 2.0, 3.0]);

        buf.advance_row();
        assert_eq!(buf.get(1), [0.0, 0.0, 0.0], "old row must be discarded");
        assert_eq!(buf.get(2), [5.0, 5.0, 5.0], "next row becomes current");

        buf.advance_row();
        assert_eq!(buf.get(2), [0.0, 0.0, 0.0], "recycled row must be zeroed");
    }

    #[test]
    fn test_error_buffer_ignores_out_of_bounds() {
        let mut buf = ErrorBuffer::new(3, 2);
        buf.add(3, 0, [1.0; 3]);
        buf.add(0, 2, [1.0; 3]);
        for x in 0..3 {
            assert_eq!(buf.get(x), [0.0; 3]);
        }
    }

    #[test]
    fn test_all_names_unique_and_parseable() {
        let mut slugs = std::collections::HashSet::new();
        for algorithm in DitherAlgorithm::ALL {
            assert!(slugs.insert(algorithm.slug()), "duplicate slug {}", algorithm.slug());
            assert_eq!(algorithm.slug().parse::<DitherAlgorithm>().unwrap(), algorithm);
            assert_eq!(algorithm.name().parse::<DitherAlgorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_unknown_algorithm_falls_back() {
        assert!("sharpen".parse::<DitherAlgorithm>().is_err());
        assert_eq!(
            DitherAlgorithm::from_name_or_default("sharpen"),
            DitherAlgorithm::FloydSteinberg
        );
        assert_eq!(
            DitherAlgorithm::from_name_or_default("JARVIS"),
            DitherAlgorithm::JarvisJudiceNinke
        );
    }

    #[test]
    fn test_only_floyd_steinberg_honors_serpentine() {
        let honoring: Vec<_> = DitherAlgorithm::ALL
            .into_iter()
            .filter(|a| a.honors_serpentine())
            .collect();
        assert_eq!(honoring, vec![DitherAlgorithm::FloydSteinberg]);
    }

    #[test]
    fn test_texture_for_sized_bayer() {
        let params = Parameters::new()
            .algorithm(DitherAlgorithm::OrderedBayer4x4)
            .normalized();
        assert_eq!(texture_for(&params).map(|t| t.size()), Some(4));
        assert!(texture_for(&Parameters::default()).is_none());
    }

    #[test]
    fn test_texture_for_plain_ordered_follows_bayer_size() {
        for size in [2, 4, 8, 16] {
            let params = Parameters::new()
                .algorithm(DitherAlgorithm::Ordered)
                .bayer_size(size)
                .normalized();
            assert_eq!(texture_for(&params).map(|t| t.size()), Some(size));
        }
    }

    #[test]
    fn test_apply_without_prebuilt_texture_matches() {
        let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
        let image = PixelBuffer::filled(9, 9, Rgb::gray(100));
        for algorithm in [
            DitherAlgorithm::OrderedBayer8x8,
            DitherAlgorithm::Ordered,
            DitherAlgorithm::BlueNoise,
        ] {
            let params = Parameters::new().algorithm(algorithm).bayer_size(4).normalized();
            let texture = texture_for(&params);
            assert_eq!(
                apply(&image, &palette, &params, texture.as_ref()),
                apply(&image, &palette, &params, None),
                "{} differs without prebuilt texture",
                algorithm
            );
        }
    }
}
