//! Ditherbox - palette dithering for images and frame sequences
//!
//! The engine lives in the `dither-core` crate. This library holds the
//! outer surfaces the CLI is built from and exposes them for integration
//! testing.

pub mod error;
pub mod frames;
pub mod io;
pub mod models;
