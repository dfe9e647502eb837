//! Edge detection for gradient-based diffusion.

use crate::buffer::PixelBuffer;
use crate::texture::{normalize_min_max, reflect_101};

/// Normalized Sobel gradient magnitude, one value in `[0, 1]` per pixel.
///
/// Computed on the rounded Rec. 601 luma with mirrored borders. A flat
/// image yields all zeros.
pub(crate) fn edge_magnitude(image: &PixelBuffer) -> Vec<f32> {
    let width = image.width();
    let height = image.height();
    let gray: Vec<f32> = image
        .pixels()
        .iter()
        .map(|p| (0.299 * p.r as f32 + 0.587 * p.g as f32 + 0.114 * p.b as f32).round())
        .collect();

    let at = |x: isize, y: isize| {
        gray[reflect_101(y, height) * width + reflect_101(x, width)]
    };

    let mut magnitude = Vec::with_capacity(gray.len());
    for y in 0..height as isize {
        for x in 0..width as isize {
            let gx = (at(x + 1, y - 1) + 2.0 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2.0 * at(x - 1, y) + at(x - 1, y + 1));
            let gy = (at(x - 1, y + 1) + 2.0 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2.0 * at(x, y - 1) + at(x + 1, y - 1));
            magnitude.push((gx * gx + gy * gy).sqrt());
        }
    }

    normalize_min_max(&mut magnitude);
    magnitude
}
