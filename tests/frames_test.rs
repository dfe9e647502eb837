//! Tests for frame-sequence processing over PNG directories.

mod common;

use common::{assert_in_palette, fixtures};
use dither_core::{DitherAlgorithm, Ditherer, Parameters};
use ditherbox::error::FrameError;
use ditherbox::frames::{frame_file_name, CancelFlag, FrameDriver, PngDirSink, PngDirSource};
use ditherbox::io::load_png;
use pretty_assertions::assert_eq;

fn driver(algorithm: DitherAlgorithm) -> FrameDriver {
    FrameDriver::new(Ditherer::new(Parameters::new().algorithm(algorithm)).unwrap())
}

#[test]
fn test_frames_written_in_order_with_progress() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let frames = fixtures::write_frames(input.path(), 4, 10, 6);

    let driver = driver(DitherAlgorithm::Stucki);
    let mut source = PngDirSource::open(input.path()).unwrap();
    let mut sink = PngDirSink::create(output.path()).unwrap();
    let mut fractions = Vec::new();

    let written = driver
        .run(
            &mut source,
            &mut sink,
            |p| fractions.push(p.fraction()),
            &CancelFlag::new(),
        )
        .unwrap();

    assert_eq!(written, 4);
    assert_eq!(fractions, vec![0.25, 0.5, 0.75, 1.0]);

    for (i, frame) in frames.iter().enumerate() {
        let out = load_png(&output.path().join(frame_file_name(i))).unwrap();
        // Each frame is dithered on its own, with no state from earlier frames
        assert_eq!(out, driver.ditherer().dither(frame));
        assert_in_palette(&out, driver.ditherer().palette());
    }
}

#[test]
fn test_cancellation_stops_between_frames() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fixtures::write_frames(input.path(), 5, 4, 4);

    let mut source = PngDirSource::open(input.path()).unwrap();
    let mut sink = PngDirSink::create(output.path()).unwrap();
    let cancel = CancelFlag::new();
    let trigger = cancel.clone();

    let err = driver(DitherAlgorithm::FloydSteinberg)
        .run(
            &mut source,
            &mut sink,
            |p| {
                if p.done == 1 {
                    trigger.cancel();
                }
            },
            &cancel,
        )
        .unwrap_err();

    assert!(matches!(err, FrameError::Cancelled { completed: 1 }));
    assert!(output.path().join(frame_file_name(0)).is_file());
    assert!(!output.path().join(frame_file_name(1)).exists());
}

#[test]
fn test_corrupt_frame_aborts_job() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fixtures::write_frames(input.path(), 1, 4, 4);
    std::fs::write(input.path().join("input_001.png"), b"garbage").unwrap();

    let mut source = PngDirSource::open(input.path()).unwrap();
    let mut sink = PngDirSink::create(output.path()).unwrap();
    let err = driver(DitherAlgorithm::OrderedBayer8x8)
        .run(&mut source, &mut sink, |_| {}, &CancelFlag::new())
        .unwrap_err();

    assert!(matches!(err, FrameError::PngDecode(_)));
    assert!(output.path().join(frame_file_name(0)).is_file());
}

#[test]
fn test_empty_input_directory() {
    let input = tempfile::tempdir().unwrap();
    assert!(matches!(
        PngDirSource::open(input.path()),
        Err(FrameError::EmptySequence(_))
    ));
}
