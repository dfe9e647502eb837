//! PNG decode and encode.
//!
//! Decoding accepts any 8/16-bit grayscale, grayscale+alpha, RGB, RGBA or
//! indexed PNG and drops alpha. Encoding always writes 8-bit RGB, so a
//! decoded-then-encoded buffer round-trips exactly.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;

use dither_core::PixelBuffer;

use crate::error::FrameError;

/// Decode a PNG from any reader.
pub fn decode_png<R: Read>(reader: R) -> Result<PixelBuffer, FrameError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| FrameError::PngDecode(e.to_string()))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| FrameError::PngDecode(e.to_string()))?;
    let data = &buf[..frame.buffer_size()];

    let (width, height) = (frame.width as usize, frame.height as usize);
    let rgb: Vec<u8> = match (frame.color_type, frame.bit_depth) {
        (png::ColorType::Rgb, png::BitDepth::Eight) => data.to_vec(),
        (png::ColorType::Rgba, png::BitDepth::Eight) => data
            .chunks_exact(4)
            .flat_map(|c| [c[0], c[1], c[2]])
            .collect(),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            data.iter().flat_map(|&v| [v, v, v]).collect()
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => data
            .chunks_exact(2)
            .flat_map(|c| [c[0], c[0], c[0]])
            .collect(),
        (color_type, bit_depth) => {
            return Err(FrameError::UnsupportedPng {
                color_type,
                bit_depth,
            })
        }
    };

    PixelBuffer::from_rgb_bytes(width, height, &rgb)
        .map_err(|e| FrameError::PngDecode(e.to_string()))
}

/// Encode a buffer as an 8-bit RGB PNG.
pub fn encode_png<W: Write>(image: &PixelBuffer, writer: W) -> Result<(), FrameError> {
    let mut encoder = png::Encoder::new(writer, image.width() as u32, image.height() as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);
    let mut writer = encoder
        .write_header()
        .map_err(|e| FrameError::PngEncode(e.to_string()))?;
    writer
        .write_image_data(&image.to_rgb_bytes())
        .map_err(|e| FrameError::PngEncode(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| FrameError::PngEncode(e.to_string()))
}

/// Encode a buffer into an in-memory PNG.
pub fn encode_png_bytes(image: &PixelBuffer) -> Result<Vec<u8>, FrameError> {
    let mut buf = Cursor::new(Vec::new());
    encode_png(image, &mut buf)?;
    Ok(buf.into_inner())
}

/// Load a PNG file.
pub fn load_png(path: &Path) -> Result<PixelBuffer, FrameError> {
    let file = File::open(path).map_err(|e| FrameError::io(path, e))?;
    decode_png(BufReader::new(file))
}

/// Write a PNG file, replacing any existing file.
pub fn save_png(image: &PixelBuffer, path: &Path) -> Result<(), FrameError> {
    let file = File::create(path).map_err(|e| FrameError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    encode_png(image, &mut writer)?;
    writer.flush().map_err(|e| FrameError::io(path, e))
}
