//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette validation.
///
/// Any of these surfaces from the engine as
/// [`DitherError::InvalidPalette`](crate::DitherError::InvalidPalette).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No colors provided (custom mode without colors, or an empty list)
    #[error("palette cannot be empty")]
    Empty,
    /// A custom color string could not be parsed
    #[error("invalid color {input:?}: {source}")]
    ParseColor {
        /// The offending input string
        input: String,
        /// Why it failed
        #[source]
        source: ParseColorError,
    },
}
