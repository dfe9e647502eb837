use std::path::PathBuf;

use dither_core::DitherError;
use thiserror::Error;

/// Errors raised while reading, dithering or writing frames.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG layout: {color_type:?} at {bit_depth:?}")]
    UnsupportedPng {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },

    #[error("Dither error: {0}")]
    Dither(#[from] DitherError),

    #[error("Cancelled after {completed} frames")]
    Cancelled { completed: usize },

    #[error("No frames found in {0}")]
    EmptySequence(PathBuf),

    #[error("Frame source is empty")]
    NoFrames,
}

impl FrameError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FrameError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while loading a parameter preset.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preset: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid color in preset: {0}")]
    Color(#[from] dither_core::PaletteError),
}
