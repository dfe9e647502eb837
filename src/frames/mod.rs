//! Frame sequences: sources, sinks and the driver that dithers them.

mod driver;
mod png_dir;

pub use driver::{CancelFlag, FrameDriver, Progress};
pub use png_dir::{frame_file_name, PngDirSink, PngDirSource};

use dither_core::PixelBuffer;

use crate::error::FrameError;

/// Trait for an ordered stream of input frames
pub trait FrameSource {
    /// Number of frames the source will yield in total
    fn total_frames(&self) -> usize;

    /// Decode the next frame, or `None` when the sequence is exhausted
    fn next_frame(&mut self) -> Option<Result<PixelBuffer, FrameError>>;
}

/// Trait for a destination of dithered frames
pub trait FrameSink {
    /// Store frame `index` (0-based, in source order)
    fn write_frame(&mut self, index: usize, frame: &PixelBuffer) -> Result<(), FrameError>;
}
