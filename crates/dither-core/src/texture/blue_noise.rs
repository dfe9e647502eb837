//! Seeded blue-noise-like threshold texture.
//!
//! White noise from a seeded generator is smoothed with a 5x5 Gaussian
//! (sigma 1, mirrored borders) and stretched back to `[0, 1]`. The blur
//! suppresses the isolated spikes that make raw white noise look grainy.
//! The same `(size, seed)` always produces the same texture.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{normalize_min_max, reflect_101, ThresholdMap};

const RADIUS: isize = 2;
const SIGMA: f32 = 1.0;

/// Generate a `size × size` noise texture with values in `[0, 1]`.
pub fn generate_blue_noise(size: usize, seed: u64) -> ThresholdMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise: Vec<f32> = (0..size * size).map(|_| rng.gen::<f32>()).collect();

    let mut values = gaussian_blur(&noise, size);
    normalize_min_max(&mut values);
    tracing::trace!(size, seed, "Generated blue noise texture");
    ThresholdMap::new(size, values)
}

fn gaussian_taps() -> [f32; (2 * RADIUS + 1) as usize] {
    let mut taps = [0.0; (2 * RADIUS + 1) as usize];
    for (i, tap) in taps.iter_mut().enumerate() {
        let d = i as f32 - RADIUS as f32;
        *tap = (-(d * d) / (2.0 * SIGMA * SIGMA)).exp();
    }
    let sum: f32 = taps.iter().sum();
    taps.iter_mut().for_each(|t| *t /= sum);
    taps
}

/// Separable 5x5 Gaussian over a square grid.
fn gaussian_blur(src: &[f32], size: usize) -> Vec<f32> {
    let taps = gaussian_taps();
    let mut horizontal = vec![0.0; src.len()];
    for y in 0..size {
        for x in 0..size {
            horizontal[y * size + x] = taps
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    let sx = reflect_101(x as isize + i as isize - RADIUS, size);
                    src[y * size + sx] * w
                })
                .sum();
        }
    }

    let mut out = vec![0.0; src.len()];
    for y in 0..size {
        for x in 0..size {
            out[y * size + x] = taps
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    let sy = reflect_101(y as isize + i as isize - RADIUS, size);
                    horizontal[sy * size + x] * w
                })
                .sum();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_for_seed() {
        assert_eq!(generate_blue_noise(32, 7), generate_blue_noise(32, 7));
        assert_ne!(generate_blue_noise(32, 7), generate_blue_noise(32, 8));
    }

    #[test]
    fn test_normalized_range() {
        let map = generate_blue_noise(64, 42);
        let values = map.values();
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(min.abs() < 1e-6, "min should be 0, got {min}");
        assert!((max - 1.0).abs() < 1e-6, "max should be 1, got {max}");
    }

    #[test]
    fn test_taps_sum_to_one() {
        let sum: f32 = gaussian_taps().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_cell_texture_is_zero() {
        let map = generate_blue_noise(1, 42);
        assert_eq!(map.values(), &[0.0]);
    }

    #[test]
    fn test_empty_texture() {
        assert!(generate_blue_noise(0, 42).values().is_empty());
    }
}
