//! Color types.
//!
//! - [`Rgb`]: the 8-bit sample stored in every pixel buffer and palette
//! - `Hsv`: internal hue/saturation/value form for the saturation adjustment

mod hsv;
mod rgb;

pub(crate) use hsv::Hsv;
pub use rgb::Rgb;
