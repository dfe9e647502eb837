//! Threshold dithering: every pixel is offset by a position-dependent amount
//! and then snapped to the nearest palette color.
//!
//! Offsets come from a threshold value `t` in `[0, 1]`. Texture and pattern
//! algorithms add `(t * 255 - 127.5) * strength`, so low thresholds darken
//! and high ones brighten. The halftone family uses the mirrored
//! `(127.5 - t * 255) * strength`: a pixel lightens near the center of its
//! cell, where `t` is small.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::palette::Palette;
use crate::texture::ThresholdMap;

/// Fixed 4x4 threshold pattern for [`pattern`].
const PATTERN_4X4: [[f32; 4]; 4] = [
    [0.0, 0.5, 0.125, 0.625],
    [0.75, 0.25, 0.875, 0.375],
    [0.1875, 0.6875, 0.0625, 0.5625],
    [0.9375, 0.4375, 0.8125, 0.3125],
];

/// Growth order of the clustered-dot cell, center first.
const CLUSTERED_DOT_4X4: [[u8; 4]; 4] = [
    [12, 5, 6, 13],
    [4, 0, 1, 7],
    [11, 3, 2, 8],
    [15, 10, 9, 14],
];

/// Smallest halftone cell that still forms a visible dot.
const MIN_HALFTONE_CELL: u32 = 4;

#[inline]
fn centered(t: f32, strength: f32) -> f32 {
    (t * 255.0 - 127.5) * strength
}

#[inline]
fn mirrored(t: f32, strength: f32) -> f32 {
    (127.5 - t * 255.0) * strength
}

/// Quantize every pixel after adding `offset(x, y)` to all three channels.
///
/// The shifted value is rounded toward the unshifted one. An offset of
/// exactly half the range then lands on 127 or 128 on the side the pixel
/// started from, so pure black and white never flip.
///
/// Pixels are visited in raster order, which fixes the sequence in which a
/// stateful `offset` is called.
pub(crate) fn offset_dither<F>(image: &PixelBuffer, palette: &Palette, mut offset: F) -> PixelBuffer
where
    F: FnMut(usize, usize) -> f32,
{
    let width = image.width();
    let mut pixels = Vec::with_capacity(image.len());
    for (idx, pixel) in image.pixels().iter().enumerate() {
        let (x, y) = (idx % width.max(1), idx / width.max(1));
        let shift = offset(x, y);
        let value = pixel.to_f32().map(|c| {
            let v = (c + shift).clamp(0.0, 255.0);
            if shift < 0.0 {
                v.ceil()
            } else {
                v.floor()
            }
        });
        pixels.push(palette.nearest(Rgb::from_clamped(value)));
    }
    PixelBuffer::from_parts(image.width(), image.height(), pixels)
}

/// Ordered dithering against a tiled texture (Bayer or blue noise).
pub(crate) fn textured(
    image: &PixelBuffer,
    palette: &Palette,
    map: &ThresholdMap,
    strength: f32,
) -> PixelBuffer {
    offset_dither(image, palette, |x, y| centered(map.tiled(x, y), strength))
}

/// White noise: one fresh uniform draw per pixel from a seeded generator.
pub(crate) fn white_noise(
    image: &PixelBuffer,
    palette: &Palette,
    seed: u64,
    strength: f32,
) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    offset_dither(image, palette, |_, _| centered(rng.gen::<f32>(), strength))
}

/// Fixed 4x4 pattern.
pub(crate) fn pattern(image: &PixelBuffer, palette: &Palette, strength: f32) -> PixelBuffer {
    offset_dither(image, palette, |x, y| {
        centered(PATTERN_4X4[y % 4][x % 4], strength)
    })
}

/// Nearest color, no offset.
pub(crate) fn threshold(image: &PixelBuffer, palette: &Palette) -> PixelBuffer {
    offset_dither(image, palette, |_, _| 0.0)
}

pub(crate) fn clustered_dot(image: &PixelBuffer, palette: &Palette, strength: f32) -> PixelBuffer {
    offset_dither(image, palette, |x, y| {
        let t = CLUSTERED_DOT_4X4[y % 4][x % 4] as f32 / 16.0;
        mirrored(t, strength)
    })
}

/// Signed distance of `(x, y)` from the center of its halftone cell.
#[inline]
fn cell_offset(x: usize, y: usize, scale: f32) -> (f32, f32) {
    let half = scale / 2.0;
    ((x as f32 % scale) - half, (y as f32 % scale) - half)
}

/// Round dots: the threshold grows with euclidean distance from the cell center.
pub(crate) fn halftone_circle(
    image: &PixelBuffer,
    palette: &Palette,
    pattern_scale: u32,
    strength: f32,
) -> PixelBuffer {
    let scale = pattern_scale.max(MIN_HALFTONE_CELL) as f32;
    offset_dither(image, palette, |x, y| {
        let (cx, cy) = cell_offset(x, y, scale);
        let t = ((cx * cx + cy * cy).sqrt() / (scale / 2.0)).clamp(0.0, 1.0);
        mirrored(t, strength)
    })
}

/// Diamond dots: the threshold grows with manhattan distance from the cell center.
pub(crate) fn halftone_diamond(
    image: &PixelBuffer,
    palette: &Palette,
    pattern_scale: u32,
    strength: f32,
) -> PixelBuffer {
    let scale = pattern_scale.max(MIN_HALFTONE_CELL) as f32;
    offset_dither(image, palette, |x, y| {
        let (cx, cy) = cell_offset(x, y, scale);
        let t = ((cx.abs() + cy.abs()) / scale).clamp(0.0, 1.0);
        mirrored(t, strength)
    })
}
