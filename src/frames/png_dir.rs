use std::fs;
use std::path::{Path, PathBuf};

use dither_core::PixelBuffer;

use super::{FrameSink, FrameSource};
use crate::error::FrameError;
use crate::io::{load_png, save_png};

/// Output name for frame `index`: `frame_000001.png` for index 0
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:06}.png", index + 1)
}

/// Every `*.png` in a directory, in file-name order
pub struct PngDirSource {
    paths: Vec<PathBuf>,
    next: usize,
}

impl PngDirSource {
    /// Scan `dir` for PNG files.
    ///
    /// Subdirectories are not descended into. The extension match is
    /// case-insensitive.
    pub fn open(dir: &Path) -> Result<Self, FrameError> {
        let entries = fs::read_dir(dir).map_err(|e| FrameError::io(dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| FrameError::io(dir, e))?.path();
            let is_png = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            if is_png && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(FrameError::EmptySequence(dir.to_path_buf()));
        }

        tracing::debug!(dir = %dir.display(), frames = paths.len(), "Opened frame directory");
        Ok(Self { paths, next: 0 })
    }

    /// Input files in the order they will be read
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl FrameSource for PngDirSource {
    fn total_frames(&self) -> usize {
        self.paths.len()
    }

    fn next_frame(&mut self) -> Option<Result<PixelBuffer, FrameError>> {
        let path = self.paths.get(self.next)?;
        self.next += 1;
        Some(load_png(path))
    }
}

/// Writes frames as numbered PNGs into a directory
pub struct PngDirSink {
    dir: PathBuf,
}

impl PngDirSink {
    /// Use `dir` for output, creating it if needed
    pub fn create(dir: &Path) -> Result<Self, FrameError> {
        fs::create_dir_all(dir).map_err(|e| FrameError::io(dir, e))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Path that frame `index` is written to
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(frame_file_name(index))
    }
}

impl FrameSink for PngDirSink {
    fn write_frame(&mut self, index: usize, frame: &PixelBuffer) -> Result<(), FrameError> {
        save_png(frame, &self.frame_path(index))
    }
}
