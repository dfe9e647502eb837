//! Error types for the dithering API.

use thiserror::Error;

use crate::palette::PaletteError;

/// Error returned by [`dither`](crate::dither) and
/// [`Ditherer::new`](crate::Ditherer::new).
///
/// Out-of-range parameters are never an error; they are clamped with a
/// warning. The only hard failure is a palette that cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DitherError {
    /// Palette could not be resolved (custom mode without colors)
    #[error("invalid palette: {0}")]
    InvalidPalette(#[from] PaletteError),
}

/// A name did not match any known algorithm or palette mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} name: {name:?}")]
pub struct UnknownNameError {
    /// What was being looked up ("algorithm" or "palette")
    pub kind: &'static str,
    /// The name as given
    pub name: String,
}

impl UnknownNameError {
    pub(crate) fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}
