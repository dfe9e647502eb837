//! Assertion helpers for tests.

use dither_core::{Palette, PixelBuffer};

/// Assert every pixel of `image` is a member of `palette`
pub fn assert_in_palette(image: &PixelBuffer, palette: &Palette) {
    for y in 0..image.height() {
        for x in 0..image.width() {
            let pixel = image.get(x, y);
            assert!(
                palette.contains(pixel),
                "Pixel ({x}, {y}) = {pixel} is not in the palette {:?}",
                palette.colors()
            );
        }
    }
}

/// Assert `image` has the given dimensions
pub fn assert_dimensions(image: &PixelBuffer, width: usize, height: usize) {
    assert_eq!(
        (image.width(), image.height()),
        (width, height),
        "Unexpected image dimensions"
    );
}
