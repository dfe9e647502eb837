//! Test fixtures and image builders.

use std::path::Path;

use dither_core::{PixelBuffer, Rgb};
use ditherbox::io::save_png;

/// A `width x height` image with a red ramp across and a green ramp down
pub fn gradient(width: usize, height: usize) -> PixelBuffer {
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            Rgb::new(
                (x * 255 / width.max(2).saturating_sub(1)) as u8,
                (y * 255 / height.max(2).saturating_sub(1)) as u8,
                128,
            )
        })
        .collect();
    PixelBuffer::new(width, height, pixels).unwrap()
}

/// Write `count` gradient frames named `input_000.png`, `input_001.png`, ...
///
/// Each frame is shifted in brightness so frames are distinguishable.
pub fn write_frames(dir: &Path, count: usize, width: usize, height: usize) -> Vec<PixelBuffer> {
    (0..count)
        .map(|i| {
            let shift = (i * 40) as u8;
            let frame = gradient(width, height).map(|p| {
                Rgb::new(
                    p.r.saturating_add(shift),
                    p.g.saturating_add(shift),
                    p.b.saturating_add(shift),
                )
            });
            save_png(&frame, &dir.join(format!("input_{i:03}.png"))).unwrap();
            frame
        })
        .collect()
}

/// Preset YAML exercising most fields
pub const GAMEBOY_PRESET: &str = r##"
algorithm: atkinson
palette: gameboy
strength: 0.9
contrast: 1.2
seed: 99
"##;
