//! Riemersma-style dithering along a serpentine path.
//!
//! Instead of a kernel, a single error vector follows the scan path and
//! decays by a constant factor at every step. The path snakes through the
//! image row by row, so the error always moves to an adjacent pixel.

use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::palette::Palette;

/// Share of the error kept when moving to the next pixel.
const DECAY: f32 = 0.8;

pub(crate) fn riemersma(image: &PixelBuffer, palette: &Palette, strength: f32) -> PixelBuffer {
    let width = image.width();
    let height = image.height();
    let input = image.pixels();
    let mut output = vec![Rgb::BLACK; input.len()];
    let mut error = [0.0f32; 3];

    for y in 0..height {
        let x_range: Box<dyn Iterator<Item = usize>> = if y % 2 == 1 {
            Box::new((0..width).rev())
        } else {
            Box::new(0..width)
        };

        for x in x_range {
            let idx = y * width + x;
            let source = input[idx].to_f32();
            let value: [f32; 3] =
                std::array::from_fn(|c| (source[c] + error[c] * strength).clamp(0.0, 255.0));

            let nearest = palette.nearest(Rgb::from_clamped(value));
            output[idx] = nearest;

            let target = nearest.to_f32();
            error = std::array::from_fn(|c| (value[c] - target[c]) * DECAY);
        }
    }

    PixelBuffer::from_parts(width, height, output)
}
