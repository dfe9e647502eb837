//! The error diffusion loop shared by every kernel-based algorithm.

use rand::rngs::StdRng;
use rand::Rng;

use super::kernel::Kernel;
use super::ErrorBuffer;
use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::palette::Palette;

/// Range of the per-weight jitter factor used by variable error diffusion.
const JITTER_RANGE: std::ops::Range<f32> = 0.7..1.3;

/// Per-pixel adjustment of kernel weights or strength.
pub(crate) enum Modulation<'a> {
    /// Kernel weights as listed.
    Fixed,
    /// Ostromoukhov-style weights that depend on the pixel's intensity.
    ///
    /// Only meaningful for the four-entry Floyd-Steinberg kernel.
    Intensity,
    /// Every weight multiplied by an independent factor in `0.7..1.3`.
    ///
    /// Factors above 1 can hand out more error than the pixel produced, up
    /// to 1.3 times as much.
    Jitter(StdRng),
    /// Strength scaled by `0.5 + 0.5 * edge` where `edge` is the pixel's
    /// normalized gradient magnitude.
    EdgeStrength(&'a [f32]),
}

impl Modulation<'_> {
    /// Fill `weights` for the pixel at `idx` and return the strength to use.
    #[inline]
    fn prepare(
        &mut self,
        kernel: &Kernel,
        idx: usize,
        value: [f32; 3],
        strength: f32,
        weights: &mut [f32],
    ) -> f32 {
        for (i, w) in weights.iter_mut().enumerate() {
            *w = kernel.weight(i);
        }
        match self {
            Modulation::Fixed => strength,
            Modulation::Intensity => {
                let intensity = (value[0] + value[1] + value[2]) / (3.0 * 255.0);
                let raw = [
                    7.0 * (1.0 - intensity) + 3.0 * intensity,
                    3.0 * (1.0 - intensity) + 7.0 * intensity,
                    5.0,
                    1.0,
                ];
                let sum: f32 = raw.iter().sum();
                for (w, r) in weights.iter_mut().zip(raw) {
                    *w = r / sum;
                }
                strength
            }
            Modulation::Jitter(rng) => {
                for w in weights.iter_mut() {
                    *w *= rng.gen_range(JITTER_RANGE);
                }
                strength
            }
            Modulation::EdgeStrength(edges) => strength * (0.5 + 0.5 * edges[idx]),
        }
    }
}

/// Running totals of quantization error over one scan.
///
/// Measured as the channel sum of absolute error, before and after weighting.
/// Whatever was generated but not diffused fell off the image edge or was
/// held back by a kernel whose weights sum below 1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiffusionStats {
    /// Total `|error| * strength` produced by quantization.
    pub generated: f64,
    /// Part of `generated` that landed on a pixel inside the image.
    pub diffused: f64,
}

impl DiffusionStats {
    /// Fraction of generated error that was not diffused.
    pub fn dropped_fraction(&self) -> f64 {
        if self.generated <= 0.0 {
            0.0
        } else {
            1.0 - self.diffused / self.generated
        }
    }
}

/// Dither `image` by spreading each pixel's quantization error over `kernel`.
///
/// Each pixel is the input plus accumulated error, clamped to 0..255. The
/// nearest palette color is written out and the difference is handed to the
/// unvisited neighbors, scaled by the kernel weight and `strength`. Targets
/// outside the image are dropped. With `serpentine`, odd rows run right to
/// left with the kernel mirrored.
pub(crate) fn error_diffusion(
    image: &PixelBuffer,
    palette: &Palette,
    kernel: &Kernel,
    strength: f32,
    serpentine: bool,
    mut modulation: Modulation<'_>,
) -> (PixelBuffer, DiffusionStats) {
    let width = image.width();
    let height = image.height();
    let input = image.pixels();
    let mut output = vec![Rgb::BLACK; input.len()];
    let mut stats = DiffusionStats::default();

    let mut error_buf = ErrorBuffer::new(width, kernel.max_dy + 1);
    let mut weights = vec![0.0f32; kernel.entries.len()];

    for y in 0..height {
        let reverse = serpentine && y % 2 == 1;

        let x_range: Box<dyn Iterator<Item = usize>> = if reverse {
            Box::new((0..width).rev())
        } else {
            Box::new(0..width)
        };

        for x in x_range {
            let idx = y * width + x;

            // Add accumulated error to input pixel
            let accumulated = error_buf.get(x);
            let source = input[idx].to_f32();
            let value: [f32; 3] =
                std::array::from_fn(|c| (source[c] + accumulated[c]).clamp(0.0, 255.0));

            let nearest = palette.nearest(Rgb::from_clamped(value));
            output[idx] = nearest;

            let target = nearest.to_f32();
            let error: [f32; 3] = std::array::from_fn(|c| value[c] - target[c]);

            let pixel_strength = modulation.prepare(kernel, idx, value, strength, &mut weights);
            let magnitude = (error[0].abs() + error[1].abs() + error[2].abs()) as f64;
            stats.generated += magnitude * pixel_strength as f64;

            // Diffuse error to neighbors
            for (&(dx, dy, _), &weight) in kernel.entries.iter().zip(&weights) {
                let effective_dx = if reverse { -dx } else { dx };
                let nx = x as i32 + effective_dx;
                if nx < 0 || nx as usize >= width || y + dy as usize >= height {
                    continue;
                }
                let scale = weight * pixel_strength;
                error_buf.add(nx as usize, dy as usize, error.map(|e| e * scale));
                stats.diffused += magnitude * scale as f64;
            }
        }

        error_buf.advance_row();
    }

    let output = PixelBuffer::from_parts(width, height, output);
    (output, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::kernel;
    use rand::SeedableRng;

    fn bw() -> Palette {
        Palette::new(vec![Rgb::BLACK, Rgb::WHITE]).unwrap()
    }

    fn run(image: &PixelBuffer, kernel: &Kernel, serpentine: bool) -> (PixelBuffer, DiffusionStats) {
        error_diffusion(image, &bw(), kernel, 1.0, serpentine, Modulation::Fixed)
    }

    #[test]
    fn test_single_pixel_drops_all_error() {
        let image = PixelBuffer::filled(1, 1, Rgb::gray(100));
        let (out, stats) = run(&image, &kernel::FLOYD_STEINBERG, false);
        assert_eq!(out.pixels(), &[Rgb::BLACK]);
        assert!(stats.generated > 0.0);
        assert_eq!(stats.diffused, 0.0);
    }

    #[test]
    fn test_first_pixel_error_reaches_right_neighbor() {
        // 100 -> black, error 100 * 7/16 = 43.75 pushes the neighbor to 143.75
        let image = PixelBuffer::filled(2, 1, Rgb::gray(100));
        let (out, _) = run(&image, &kernel::FLOYD_STEINBERG, false);
        assert_eq!(out.pixels(), &[Rgb::BLACK, Rgb::WHITE]);
    }

    #[test]
    fn test_exact_palette_colors_pass_through() {
        let image = PixelBuffer::new(
            2,
            2,
            vec![Rgb::BLACK, Rgb::WHITE, Rgb::WHITE, Rgb::BLACK],
        )
        .unwrap();
        for k in [&kernel::FLOYD_STEINBERG, &kernel::STUCKI, &kernel::ATKINSON] {
            let (out, stats) = run(&image, k, true);
            assert_eq!(out, image);
            assert_eq!(stats.generated, 0.0);
        }
    }

    #[test]
    fn test_zero_strength_is_plain_quantization() {
        let image = PixelBuffer::filled(8, 8, Rgb::gray(140));
        let (out, stats) = error_diffusion(
            &image,
            &bw(),
            &kernel::JARVIS_JUDICE_NINKE,
            0.0,
            false,
            Modulation::Fixed,
        );
        assert!(out.pixels().iter().all(|&p| p == Rgb::WHITE));
        assert_eq!(stats.generated, 0.0);
    }

    #[test]
    fn test_diffused_never_exceeds_generated() {
        let pixels = (0..64u32).map(|i| Rgb::gray((i * 4) as u8)).collect();
        let image = PixelBuffer::new(8, 8, pixels).unwrap();
        for k in [
            &kernel::FLOYD_STEINBERG,
            &kernel::ATKINSON,
            &kernel::SHIAU_FAN,
            &kernel::STEVEN_PIGEON,
        ] {
            let (_, stats) = run(&image, k, false);
            assert!(stats.diffused <= stats.generated + 1e-6);
            assert!(stats.dropped_fraction() >= -1e-9);
        }
    }

    #[test]
    fn test_atkinson_drops_at_least_a_quarter() {
        let image = PixelBuffer::filled(16, 16, Rgb::gray(90));
        let (_, stats) = run(&image, &kernel::ATKINSON, false);
        assert!(stats.dropped_fraction() >= 0.25 - 1e-6);
    }

    #[test]
    fn test_serpentine_changes_floyd_steinberg() {
        let pixels = (0..100u32).map(|i| Rgb::gray((i * 37 % 256) as u8)).collect();
        let image = PixelBuffer::new(10, 10, pixels).unwrap();
        let (forward, _) = run(&image, &kernel::FLOYD_STEINBERG, false);
        let (snake, _) = run(&image, &kernel::FLOYD_STEINBERG, true);
        assert_ne!(forward, snake);
    }

    #[test]
    fn test_intensity_weights_sum_to_one() {
        let mut weights = [0.0f32; 4];
        for level in [0.0, 64.0, 200.0, 255.0] {
            Modulation::Intensity.prepare(
                &kernel::FLOYD_STEINBERG,
                0,
                [level; 3],
                1.0,
                &mut weights,
            );
            let sum: f32 = weights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "sum {sum} at level {level}");
        }
        // Dark pixels push most error to the right
        Modulation::Intensity.prepare(&kernel::FLOYD_STEINBERG, 0, [0.0; 3], 1.0, &mut weights);
        assert!((weights[0] - 7.0 / 16.0).abs() < 1e-6);
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let mut modulation = Modulation::Jitter(StdRng::seed_from_u64(1));
        let mut weights = [0.0f32; 4];
        for _ in 0..100 {
            modulation.prepare(&kernel::FLOYD_STEINBERG, 0, [0.0; 3], 1.0, &mut weights);
            for (i, w) in weights.iter().enumerate() {
                let base = kernel::FLOYD_STEINBERG.weight(i);
                assert!(*w >= base * 0.7 - 1e-6 && *w < base * 1.3 + 1e-6);
            }
        }
    }

    #[test]
    fn test_edge_strength_scales() {
        let edges = [0.0, 1.0];
        let mut modulation = Modulation::EdgeStrength(&edges);
        let mut weights = [0.0f32; 4];
        let flat = modulation.prepare(&kernel::FLOYD_STEINBERG, 0, [0.0; 3], 1.0, &mut weights);
        let edge = modulation.prepare(&kernel::FLOYD_STEINBERG, 1, [0.0; 3], 1.0, &mut weights);
        assert!((flat - 0.5).abs() < f32::EPSILON);
        assert!((edge - 1.0).abs() < f32::EPSILON);
    }
}
