//! Public API for the dither-core crate.
//!
//! This module provides the high-level entry points: the reusable
//! [`Ditherer`], the one-shot [`dither`] function and the error types they
//! return.

mod builder;
mod error;

pub use builder::{dither, Ditherer};
pub use error::{DitherError, UnknownNameError};
