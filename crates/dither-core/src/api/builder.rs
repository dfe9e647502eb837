//! Ditherer -- the reusable entry point for the crate.
//!
//! [`Ditherer`] resolves everything that only depends on the parameters
//! (clamped values, palette, threshold texture) once, so a frame sequence
//! pays for it a single time.

use crate::api::DitherError;
use crate::buffer::PixelBuffer;
use crate::dither::{self, DitherAlgorithm};
use crate::palette::{get_palette, Palette};
use crate::params::Parameters;
use crate::preprocess::Preprocessor;
use crate::texture::ThresholdMap;

/// Prepared dithering pipeline.
///
/// Built from [`Parameters`], which are normalized on construction. The
/// palette is resolved up front, so a `Ditherer` that exists can always
/// dither. [`dither()`](Self::dither) takes `&self` and keeps no state
/// between calls: every image starts from a zero error grid.
///
/// # Example
///
/// ```
/// use dither_core::{DitherAlgorithm, Ditherer, Parameters, PixelBuffer, Rgb};
///
/// let ditherer = Ditherer::new(
///     Parameters::new().algorithm(DitherAlgorithm::OrderedBayer4x4),
/// )
/// .unwrap();
///
/// let image = PixelBuffer::filled(4, 4, Rgb::gray(128));
/// let result = ditherer.dither(&image);
///
/// assert_eq!(result.width(), 4);
/// assert!(result.pixels().iter().all(|&p| ditherer.palette().contains(p)));
/// ```
#[derive(Debug, Clone)]
pub struct Ditherer {
    params: Parameters,
    palette: Palette,
    preprocessor: Preprocessor,
    texture: Option<ThresholdMap>,
}

impl Ditherer {
    /// Normalize `params` and resolve the palette and threshold texture.
    ///
    /// # Errors
    ///
    /// Returns [`DitherError::InvalidPalette`] when the palette mode is
    /// custom and no colors (or an empty list) were given.
    pub fn new(params: Parameters) -> Result<Self, DitherError> {
        let params = params.normalized();
        let palette = get_palette(params.palette_mode, params.custom_palette.as_deref())?;
        let preprocessor = Preprocessor::from_params(&params);
        let texture = dither::texture_for(&params);

        Ok(Self {
            params,
            palette,
            preprocessor,
            texture,
        })
    }

    /// The normalized parameters in use.
    #[inline]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// The resolved palette.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The selected algorithm.
    #[inline]
    pub fn algorithm(&self) -> DitherAlgorithm {
        self.params.algorithm
    }

    /// Dither one image.
    ///
    /// 1. Preprocess (contrast, brightness, gamma, saturation)
    /// 2. Run the selected algorithm against the palette
    ///
    /// Every output pixel is a member of [`palette()`](Self::palette).
    pub fn dither(&self, image: &PixelBuffer) -> PixelBuffer {
        tracing::debug!(
            algorithm = self.params.algorithm.name(),
            palette_size = self.palette.len(),
            width = image.width(),
            height = image.height(),
            "Dithering image"
        );

        // 1. Preprocess
        let prepared = self.preprocessor.process(image);

        // 2. Dither
        dither::apply(&prepared, &self.palette, &self.params, self.texture.as_ref())
    }
}

/// Dither `image` with `params` in one call.
///
/// Equivalent to `Ditherer::new(params.clone())?.dither(image)`. Use a
/// [`Ditherer`] when processing many images with the same parameters.
///
/// # Errors
///
/// Returns [`DitherError::InvalidPalette`] when the palette cannot be
/// resolved. No output is produced in that case.
pub fn dither(image: &PixelBuffer, params: &Parameters) -> Result<PixelBuffer, DitherError> {
    Ok(Ditherer::new(params.clone())?.dither(image))
}
