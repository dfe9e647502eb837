//! Image preprocessing before dithering.
//!
//! Every dithering pass first runs the input through a [`Preprocessor`]
//! built from the pass's [`Parameters`](crate::Parameters):
//!
//! 1. **Contrast and brightness** - `v * contrast + brightness` on the 0..1 scale
//! 2. **Gamma** - power curve, skipped at 1.0
//! 3. **Saturation** - HSV saturation scaling, skipped at 1.0
//! 4. **Quantize** - clamp, scale back to 0..255 and round
//!
//! With all adjustments neutral the image passes through bit-identical.

mod preprocessor;

pub use preprocessor::{preprocess, Preprocessor};
