//! Tone and color adjustment applied before dithering.

use crate::buffer::PixelBuffer;
use crate::color::{Hsv, Rgb};
use crate::params::Parameters;

/// Per-pixel tone adjustments.
///
/// Each pixel runs through a fixed pipeline on the 0..1 scale:
///
/// 1. **Contrast and brightness**: `v * contrast + brightness`
/// 2. **Gamma**: `max(v, 0) ^ gamma`
/// 3. **Saturation**: scale HSV saturation
/// 4. **Clamp** to 0..1, scale to 0..255 and round
///
/// Steps 2 and 3 are skipped when their factor is 1. When every factor is
/// neutral the whole pass is skipped and the input is returned unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preprocessor {
    gamma: f32,
    contrast: f32,
    brightness: f32,
    saturation: f32,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            contrast: 1.0,
            brightness: 0.0,
            saturation: 1.0,
        }
    }
}

impl Preprocessor {
    /// Take the adjustment values from `params` as given.
    ///
    /// Call [`Parameters::normalized`] first if the values may be out of range.
    pub fn from_params(params: &Parameters) -> Self {
        Self {
            gamma: params.gamma,
            contrast: params.contrast,
            brightness: params.brightness,
            saturation: params.saturation,
        }
    }

    /// Whether processing would leave every pixel unchanged.
    pub fn is_neutral(&self) -> bool {
        !differs(self.gamma, 1.0)
            && !differs(self.contrast, 1.0)
            && !differs(self.brightness, 0.0)
            && !differs(self.saturation, 1.0)
    }

    /// Process a whole image.
    pub fn process(&self, image: &PixelBuffer) -> PixelBuffer {
        if self.is_neutral() {
            return image.clone();
        }
        tracing::trace!(
            gamma = self.gamma,
            contrast = self.contrast,
            brightness = self.brightness,
            saturation = self.saturation,
            "Preprocessing image"
        );
        image.map(|pixel| self.process_pixel(pixel))
    }

    /// Process a single pixel.
    pub fn process_pixel(&self, pixel: Rgb) -> Rgb {
        // Step 1: contrast and brightness
        let mut v = pixel
            .to_f32()
            .map(|c| c / 255.0 * self.contrast + self.brightness);

        // Step 2: gamma
        if differs(self.gamma, 1.0) {
            v = v.map(|c| c.max(0.0).powf(self.gamma));
        }

        // Step 3: saturation
        if differs(self.saturation, 1.0) {
            v = Hsv::from_rgb(v).scale_saturation(self.saturation).to_rgb();
        }

        // Step 4: back to bytes
        let [r, g, b] = v.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        Rgb::new(r, g, b)
    }
}

#[inline]
fn differs(value: f32, neutral: f32) -> bool {
    (value - neutral).abs() > f32::EPSILON
}

/// Apply the preprocessing adjustments of `params` to `image`.
///
/// `params` is normalized first, so out-of-range values are clamped.
pub fn preprocess(image: &PixelBuffer, params: &Parameters) -> PixelBuffer {
    Preprocessor::from_params(&params.normalized()).process(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swatch() -> PixelBuffer {
        PixelBuffer::new(
            4,
            1,
            vec![
                Rgb::BLACK,
                Rgb::new(200, 30, 90),
                Rgb::gray(128),
                Rgb::WHITE,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_neutral_is_identity() {
        let image = swatch();
        assert_eq!(preprocess(&image, &Parameters::default()), image);
        assert!(Preprocessor::default().is_neutral());
    }

    #[test]
    fn test_brightness_shifts_and_clamps() {
        let pre = Preprocessor::from_params(&Parameters::new().brightness(0.5));
        assert_eq!(pre.process_pixel(Rgb::BLACK), Rgb::gray(128));
        assert_eq!(pre.process_pixel(Rgb::gray(200)), Rgb::WHITE);
    }

    #[test]
    fn test_contrast_zero_gives_black() {
        let pre = Preprocessor::from_params(&Parameters::new().contrast(0.0));
        assert_eq!(pre.process_pixel(Rgb::new(10, 200, 255)), Rgb::BLACK);
    }

    #[test]
    fn test_gamma_darkens_midtones() {
        let pre = Preprocessor::from_params(&Parameters::new().gamma(2.0));
        // (128/255)^2 * 255 = 64.25
        assert_eq!(pre.process_pixel(Rgb::gray(128)), Rgb::gray(64));
        assert_eq!(pre.process_pixel(Rgb::WHITE), Rgb::WHITE);
        assert_eq!(pre.process_pixel(Rgb::BLACK), Rgb::BLACK);
    }

    #[test]
    fn test_gamma_ignores_negative_values() {
        // brightness pushes black below zero; gamma must not produce NaN
        let pre = Preprocessor::from_params(&Parameters::new().brightness(-0.5).gamma(0.5));
        assert_eq!(pre.process_pixel(Rgb::BLACK), Rgb::BLACK);
    }

    #[test]
    fn test_zero_saturation_desaturates() {
        let pre = Preprocessor::from_params(&Parameters::new().saturation(0.0));
        let out = pre.process_pixel(Rgb::new(200, 30, 90));
        assert_eq!(out, Rgb::gray(200));
    }

    #[test]
    fn test_preprocess_clamps_params() {
        let image = swatch();
        // contrast 10 is clamped to 3
        let clamped = preprocess(&image, &Parameters::new().contrast(10.0));
        let explicit = preprocess(&image, &Parameters::new().contrast(3.0));
        assert_eq!(clamped, explicit);
    }
}
