//! PNG format support.
//!
//! Every exercise result is written as an 8-bit PNG. Reading accepts the
//! common 8-bit and 16-bit layouts so a PNG can stand in for a raw input.
//!
//! - Gray and gray+alpha load as [`LoadedImage::Gray`]
//! - RGB and RGBA load as [`LoadedImage::Rgb`]
//! - Alpha is dropped, 16-bit samples keep their high byte
//!
//! # Example
//!
//! ```rust,ignore
//! use dip_io::png;
//!
//! let gray = png::read("input.png")?.into_gray();
//! png::write_gray("output.png", &gray)?;
//! ```

use crate::{IoError, IoResult};
use dip_core::{Gray8, Rgb8};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Image decoded from a PNG file.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedImage {
    /// Single-band image.
    Gray(Gray8),
    /// Three-band image.
    Rgb(Rgb8),
}

impl LoadedImage {
    /// Collapses to gray by averaging the bands (truncating).
    pub fn into_gray(self) -> Gray8 {
        match self {
            Self::Gray(img) => img,
            Self::Rgb(img) => Gray8::from_fn(img.width(), img.height(), |x, y| {
                let [r, g, b] = img.pixel(x, y);
                [((r as u16 + g as u16 + b as u16) / 3) as u8]
            }),
        }
    }
}

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<LoadedImage> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    // Palette and sub-byte gray expand to 8-bit.
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];
    let (width, height) = (info.width, info.height);

    // Bytes per sample and samples per pixel in the decoded buffer.
    let step = match info.bit_depth {
        png::BitDepth::Eight => 1,
        png::BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedBitDepth(format!("{:?}", other)));
        }
    };
    let (bands, keep) = match info.color_type {
        png::ColorType::Grayscale => (1, 1),
        png::ColorType::GrayscaleAlpha => (2, 1),
        png::ColorType::Rgb => (3, 3),
        png::ColorType::Rgba => (4, 3),
        other => {
            return Err(IoError::UnsupportedFormat(format!("PNG color type {:?}", other)));
        }
    };

    // Big-endian 16-bit: the first byte of each sample is the high byte.
    let data: Vec<u8> = bytes
        .chunks_exact(bands * step)
        .flat_map(|px| (0..keep).map(move |c| px[c * step]))
        .collect();

    if keep == 1 {
        Ok(LoadedImage::Gray(Gray8::from_data(width, height, data)?))
    } else {
        Ok(LoadedImage::Rgb(Rgb8::from_data(width, height, data)?))
    }
}

fn encode<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    color: png::ColorType,
    data: &[u8],
) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}

/// Writes an 8-bit gray PNG.
pub fn write_gray<P: AsRef<Path>>(path: P, image: &Gray8) -> IoResult<()> {
    encode(
        path,
        image.width(),
        image.height(),
        png::ColorType::Grayscale,
        image.data(),
    )
}

/// Writes an 8-bit RGB PNG.
pub fn write_rgb<P: AsRef<Path>>(path: P, image: &Rgb8) -> IoResult<()> {
    encode(
        path,
        image.width(),
        image.height(),
        png::ColorType::Rgb,
        image.data(),
    )
}
