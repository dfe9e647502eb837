use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use dither_core::Ditherer;

use super::{FrameSink, FrameSource};
use crate::error::FrameError;

/// Frames completed so far out of the total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Completed fraction in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.done as f64 / self.total as f64).min(1.0)
        }
    }
}

/// Cooperative cancellation shared between the driver and its caller.
///
/// Clones share the same flag. The driver checks it between frames, never
/// inside one.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Dithers every frame of a source into a sink with one [`Ditherer`].
///
/// Frames are independent: each one starts from a fresh error grid, so the
/// output of frame `n` does not depend on frames before it.
pub struct FrameDriver {
    ditherer: Ditherer,
}

impl FrameDriver {
    pub fn new(ditherer: Ditherer) -> Self {
        Self { ditherer }
    }

    pub fn ditherer(&self) -> &Ditherer {
        &self.ditherer
    }

    /// Run the whole sequence.
    ///
    /// Calls `progress` after every written frame. Stops with
    /// [`FrameError::Cancelled`] if `cancel` is set before a frame starts,
    /// and on the first frame that fails to decode, dither or write. A
    /// source with no frames is an error. Returns the number of frames
    /// written.
    pub fn run<S, K, P>(
        &self,
        source: &mut S,
        sink: &mut K,
        mut progress: P,
        cancel: &CancelFlag,
    ) -> Result<usize, FrameError>
    where
        S: FrameSource + ?Sized,
        K: FrameSink + ?Sized,
        P: FnMut(Progress),
    {
        let total = source.total_frames();
        if total == 0 {
            return Err(FrameError::NoFrames);
        }
        let mut done = 0;

        loop {
            if cancel.is_cancelled() {
                tracing::info!(completed = done, total, "Frame processing cancelled");
                return Err(FrameError::Cancelled { completed: done });
            }

            let Some(frame) = source.next_frame() else {
                break;
            };

            let start = Instant::now();
            let frame = frame?;
            let dithered = self.ditherer.dither(&frame);
            sink.write_frame(done, &dithered)?;
            done += 1;

            tracing::info!(
                frame = done,
                total,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Processed frame"
            );
            progress(Progress { done, total });
        }

        Ok(done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dither_core::{DitherAlgorithm, Parameters, PixelBuffer, Rgb};

    struct VecSource(Vec<Result<PixelBuffer, FrameError>>);

    impl FrameSource for VecSource {
        fn total_frames(&self) -> usize {
            self.0.len()
        }

        fn next_frame(&mut self) -> Option<Result<PixelBuffer, FrameError>> {
            if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0))
            }
        }
    }

    #[derive(Default)]
    struct VecSink(Vec<(usize, PixelBuffer)>);

    impl FrameSink for VecSink {
        fn write_frame(&mut self, index: usize, frame: &PixelBuffer) -> Result<(), FrameError> {
            self.0.push((index, frame.clone()));
            Ok(())
        }
    }

    fn driver() -> FrameDriver {
        let params = Parameters::new().algorithm(DitherAlgorithm::FloydSteinberg);
        FrameDriver::new(Ditherer::new(params).unwrap())
    }

    fn frames(n: usize) -> VecSource {
        VecSource(
            (0..n)
                .map(|i| Ok(PixelBuffer::filled(4, 4, Rgb::gray((i * 60) as u8))))
                .collect(),
        )
    }

    #[test]
    fn test_progress_reported_per_frame() {
        let mut reports = Vec::new();
        let mut sink = VecSink::default();
        let written = driver()
            .run(&mut frames(3), &mut sink, |p| reports.push(p), &CancelFlag::new())
            .unwrap();

        assert_eq!(written, 3);
        let fractions: Vec<f64> = reports.iter().map(Progress::fraction).collect();
        assert_eq!(fractions, vec![1.0 / 3.0, 2.0 / 3.0, 1.0]);
        let indices: Vec<usize> = sink.0.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_identical_frames_dither_identically() {
        let frame = PixelBuffer::filled(6, 6, Rgb::gray(100));
        let mut source = VecSource(vec![Ok(frame.clone()), Ok(frame)]);
        let mut sink = VecSink::default();
        driver()
            .run(&mut source, &mut sink, |_| {}, &CancelFlag::new())
            .unwrap();
        assert_eq!(sink.0[0].1, sink.0[1].1);
    }

    #[test]
    fn test_cancel_before_start() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let mut sink = VecSink::default();
        let err = driver()
            .run(&mut frames(2), &mut sink, |_| {}, &cancel)
            .unwrap_err();
        assert!(matches!(err, FrameError::Cancelled { completed: 0 }));
        assert!(sink.0.is_empty());
    }

    #[test]
    fn test_cancel_between_frames() {
        let cancel = CancelFlag::new();
        let handle = cancel.clone();
        let mut sink = VecSink::default();
        let err = driver()
            .run(
                &mut frames(5),
                &mut sink,
                |p| {
                    if p.done == 2 {
                        handle.cancel();
                    }
                },
                &cancel,
            )
            .unwrap_err();
        assert!(matches!(err, FrameError::Cancelled { completed: 2 }));
        assert_eq!(sink.0.len(), 2);
    }

    #[test]
    fn test_first_failure_aborts() {
        let mut source = VecSource(vec![
            Ok(PixelBuffer::filled(1, 1, Rgb::BLACK)),
            Err(FrameError::PngDecode("bad frame".to_string())),
            Ok(PixelBuffer::filled(1, 1, Rgb::BLACK)),
        ]);
        let mut sink = VecSink::default();
        let err = driver()
            .run(&mut source, &mut sink, |_| {}, &CancelFlag::new())
            .unwrap_err();
        assert!(matches!(err, FrameError::PngDecode(_)));
        assert_eq!(sink.0.len(), 1);
    }

    #[test]
    fn test_empty_source_is_an_error() {
        let mut sink = VecSink::default();
        let err = driver()
            .run(&mut frames(0), &mut sink, |_| {}, &CancelFlag::new())
            .unwrap_err();
        assert!(matches!(err, FrameError::NoFrames));
    }

    #[test]
    fn test_progress_fraction_bounds() {
        assert_eq!(Progress { done: 0, total: 4 }.fraction(), 0.0);
        assert_eq!(Progress { done: 0, total: 0 }.fraction(), 1.0);
        assert_eq!(Progress { done: 5, total: 4 }.fraction(), 1.0);
    }
}
