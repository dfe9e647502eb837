//! Threshold textures for ordered dithering.
//!
//! Both generators return a square [`ThresholdMap`] of values in `[0, 1]`
//! that the ordered algorithms tile across the image:
//!
//! | Texture | Character | Generator |
//! |---------|-----------|-----------|
//! | Bayer | Regular cross-hatch, every rank used once | [`generate_bayer_matrix`] |
//! | Blue noise | Irregular, no low-frequency clumping | [`generate_blue_noise`] |

mod bayer;
mod blue_noise;

pub use bayer::generate_bayer_matrix;
pub use blue_noise::generate_blue_noise;

/// Square grid of threshold values, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdMap {
    size: usize,
    values: Vec<f32>,
}

impl ThresholdMap {
    pub(crate) fn new(size: usize, values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), size * size, "threshold map must be square");
        Self { size, values }
    }

    /// Side length of the map.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All values in row-major order.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value at `(x, y)` inside the map. Panics when out of range.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.size + x]
    }

    /// Value at `(x, y)` with the map tiled infinitely in both directions.
    #[inline]
    pub fn tiled(&self, x: usize, y: usize) -> f32 {
        self.get(x % self.size, y % self.size)
    }

    /// Iterate over the rows of the map.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks(self.size.max(1))
    }
}

/// Mirror an out-of-range index back into `0..n` without repeating the
/// edge sample (`-1 -> 1`, `n -> n - 2`).
pub(crate) fn reflect_101(i: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let n = n as isize;
    let period = 2 * (n - 1);
    let i = i.rem_euclid(period);
    (if i >= n { period - i } else { i }) as usize
}

/// Stretch `values` to span `[0, 1]`; a flat input becomes all zeros.
pub(crate) fn normalize_min_max(values: &mut [f32]) {
    let (min, max) = values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    if range.is_nan() || range <= f32::EPSILON {
        values.fill(0.0);
        return;
    }
    for v in values.iter_mut() {
        *v = (*v - min) / range;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_101() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(6, 5), 2);
        assert_eq!(reflect_101(3, 5), 3);
        assert_eq!(reflect_101(-2, 1), 0);
        assert_eq!(reflect_101(2, 2), 0);
    }

    #[test]
    fn test_normalize_min_max() {
        let mut values = vec![2.0, 4.0, 3.0];
        normalize_min_max(&mut values);
        assert_eq!(values, vec![0.0, 1.0, 0.5]);

        let mut flat = vec![0.7; 4];
        normalize_min_max(&mut flat);
        assert_eq!(flat, vec![0.0; 4]);
    }

    #[test]
    fn test_tiled_wraps() {
        let map = ThresholdMap::new(2, vec![0.0, 0.5, 0.75, 0.25]);
        assert!((map.tiled(2, 0) - 0.0).abs() < f32::EPSILON);
        assert!((map.tiled(3, 5) - 0.25).abs() < f32::EPSILON);
        assert_eq!(map.rows().count(), 2);
    }
}
