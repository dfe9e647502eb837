//! Dot diffusion reduced to its threshold form.
//!
//! Knuth's dot diffusion visits pixels class by class and pushes error only
//! to neighbors of a higher class. This variant keeps the class matrix as a
//! threshold perturbation and carries no error between pixels, so each pixel
//! is independent like the other ordered algorithms.

use super::ordered::offset_dither;
use crate::buffer::PixelBuffer;
use crate::palette::Palette;

/// 8x8 class matrix, tiled over the image.
const CLASS_MATRIX: [[u8; 8]; 8] = [
    [39, 23, 15, 31, 38, 22, 14, 30],
    [24, 7, 1, 9, 25, 8, 2, 10],
    [16, 3, 47, 43, 17, 4, 48, 44],
    [32, 11, 41, 27, 33, 12, 42, 28],
    [37, 21, 13, 29, 40, 26, 18, 34],
    [26, 6, 0, 8, 27, 5, 61, 13],
    [19, 2, 46, 42, 20, 1, 49, 45],
    [35, 10, 40, 26, 36, 9, 43, 25],
];

/// Offset is `(class / 64 * 128 - 64) * strength`, so the swing is half
/// that of Bayer dithering.
pub(crate) fn dot_diffusion(image: &PixelBuffer, palette: &Palette, strength: f32) -> PixelBuffer {
    offset_dither(image, palette, |x, y| {
        let class = CLASS_MATRIX[y % 8][x % 8] as f32;
        (class / 64.0 * 128.0 - 64.0) * strength
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_class_zero_darkens() {
        let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
        // class 0 at (2, 5) shifts by -64, class 61 at (6, 5) by +58
        let image = PixelBuffer::filled(8, 8, Rgb::gray(150));
        let out = dot_diffusion(&image, &palette, 1.0);
        assert_eq!(out.get(2, 5), Rgb::BLACK);
        assert_eq!(out.get(6, 5), Rgb::WHITE);
    }

    #[test]
    fn test_zero_strength_is_nearest_color() {
        let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
        let image = PixelBuffer::filled(8, 8, Rgb::gray(150));
        let out = dot_diffusion(&image, &palette, 0.0);
        assert!(out.pixels().iter().all(|&p| p == Rgb::WHITE));
    }
}
