//! Headerless raw image dumps.
//!
//! A raw file is nothing but samples in row-major order. The geometry is
//! not stored anywhere, so every read needs a [`RawSpec`] describing it.
//! The class material uses 640x480 8-bit dumps, which is the default.
//!
//! # Example
//!
//! ```rust,ignore
//! use dip_io::raw::{self, RawSpec};
//!
//! let spec = RawSpec::new(256, 256);
//! let img = raw::read("stripes.raw", &spec)?.into_gray8();
//! raw::write("copy.raw", &img)?;
//! ```

use crate::{IoError, IoResult};
use byteorder::{BigEndian, ByteOrder as _, LittleEndian};
use dip_core::{Gray16, Gray8, Rgb8};
use std::path::Path;
use tracing::debug;

/// Width of one stored sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleDepth {
    /// One byte per sample.
    #[default]
    U8,
    /// Two bytes per sample, see [`ByteOrder`].
    U16,
}

impl SampleDepth {
    /// Bytes occupied by one sample.
    #[inline]
    pub fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
        }
    }
}

/// Byte order of multi-byte samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

/// Geometry and sample layout of a raw file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSpec {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Sample width.
    pub depth: SampleDepth,
    /// Sample byte order (ignored for 8-bit).
    pub byte_order: ByteOrder,
}

impl Default for RawSpec {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl RawSpec {
    /// Creates an 8-bit spec of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth: SampleDepth::U8,
            byte_order: ByteOrder::Little,
        }
    }

    /// Sets the sample depth.
    pub fn with_depth(mut self, depth: SampleDepth) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the byte order.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Exact file size in bytes this spec describes.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * self.depth.bytes()
    }

    /// Parses a `WIDTHxHEIGHT` string such as `640x480`.
    ///
    /// ```rust
    /// use dip_io::raw::RawSpec;
    ///
    /// assert_eq!(RawSpec::parse_size("256x256").unwrap(), (256, 256));
    /// assert!(RawSpec::parse_size("256").is_err());
    /// assert!(RawSpec::parse_size("0x10").is_err());
    /// ```
    pub fn parse_size(s: &str) -> IoResult<(u32, u32)> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| IoError::InvalidFile(format!("expected WIDTHxHEIGHT, got '{}'", s)))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| IoError::InvalidFile(format!("bad size '{}': {}", s, e)))
        };
        let (width, height) = (parse(w)?, parse(h)?);
        if width == 0 || height == 0 {
            return Err(IoError::InvalidFile(format!("size must be non-zero: '{}'", s)));
        }
        Ok((width, height))
    }
}

/// Decoded raw image at its stored depth.
#[derive(Debug, Clone, PartialEq)]
pub enum RawImage {
    /// 8-bit samples.
    U8(Gray8),
    /// 16-bit samples.
    U16(Gray16),
}

impl RawImage {
    /// Returns the image dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::U8(img) => img.dimensions(),
            Self::U16(img) => img.dimensions(),
        }
    }

    /// Converts to 8-bit, keeping the high byte of 16-bit samples.
    pub fn into_gray8(self) -> Gray8 {
        match self {
            Self::U8(img) => img,
            Self::U16(img) => img.map(|v| (v >> 8) as u8),
        }
    }
}

/// Decodes raw bytes according to `spec`.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] unless `bytes.len()` equals
/// [`RawSpec::byte_len`] exactly.
pub fn decode(bytes: &[u8], spec: &RawSpec) -> IoResult<RawImage> {
    let expected = spec.byte_len();
    if bytes.len() != expected {
        let what = if bytes.len() < expected {
            "not enough data"
        } else {
            "trailing data"
        };
        return Err(IoError::DimensionMismatch {
            expected: format!(
                "{} bytes for {}x{} at {} byte(s)/sample",
                expected,
                spec.width,
                spec.height,
                spec.depth.bytes()
            ),
            actual: format!("{} bytes ({})", bytes.len(), what),
        });
    }

    match spec.depth {
        SampleDepth::U8 => Ok(RawImage::U8(Gray8::from_data(
            spec.width,
            spec.height,
            bytes.to_vec(),
        )?)),
        SampleDepth::U16 => {
            let mut samples = vec![0u16; bytes.len() / 2];
            match spec.byte_order {
                ByteOrder::Little => LittleEndian::read_u16_into(bytes, &mut samples),
                ByteOrder::Big => BigEndian::read_u16_into(bytes, &mut samples),
            }
            Ok(RawImage::U16(Gray16::from_data(
                spec.width,
                spec.height,
                samples,
            )?))
        }
    }
}

/// Reads a raw file from disk.
pub fn read<P: AsRef<Path>>(path: P, spec: &RawSpec) -> IoResult<RawImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        width = spec.width,
        height = spec.height,
        "reading raw image"
    );
    decode(&bytes, spec)
}

/// Writes an 8-bit gray image as a raw dump.
pub fn write<P: AsRef<Path>>(path: P, image: &Gray8) -> IoResult<()> {
    std::fs::write(path.as_ref(), image.data())?;
    Ok(())
}

/// Writes an RGB image as interleaved raw samples.
pub fn write_rgb<P: AsRef<Path>>(path: P, image: &Rgb8) -> IoResult<()> {
    std::fs::write(path.as_ref(), image.data())?;
    Ok(())
}

/// Writes a 16-bit gray image as a raw dump in the given byte order.
pub fn write_u16<P: AsRef<Path>>(path: P, image: &Gray16, byte_order: ByteOrder) -> IoResult<()> {
    let mut bytes = vec![0u8; image.data().len() * 2];
    match byte_order {
        ByteOrder::Little => LittleEndian::write_u16_into(image.data(), &mut bytes),
        ByteOrder::Big => BigEndian::write_u16_into(image.data(), &mut bytes),
    }
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_class_geometry() {
        let spec = RawSpec::default();
        assert_eq!((spec.width, spec.height), (640, 480));
        assert_eq!(spec.byte_len(), 640 * 480);
    }

    #[test]
    fn test_decode_u8_row_major() {
        let spec = RawSpec::new(3, 2);
        let img = decode(&[1, 2, 3, 4, 5, 6], &spec).unwrap().into_gray8();
        assert_eq!(img.get(0, 1), 4);
        assert_eq!(img.get(2, 0), 3);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let spec = RawSpec::new(4, 4);
        let short = decode(&[0; 15], &spec).unwrap_err();
        assert!(short.to_string().contains("not enough data"));
        let long = decode(&[0; 17], &spec).unwrap_err();
        assert!(matches!(long, IoError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_decode_u16_byte_order() {
        let le = RawSpec::new(2, 1).with_depth(SampleDepth::U16);
        let be = le.with_byte_order(ByteOrder::Big);
        let bytes = [0x34, 0x12, 0x00, 0xff];

        match decode(&bytes, &le).unwrap() {
            RawImage::U16(img) => assert_eq!(img.data(), &[0x1234, 0xff00]),
            other => panic!("unexpected {:?}", other),
        }
        let high = decode(&bytes, &be).unwrap().into_gray8();
        assert_eq!(high.data(), &[0x34, 0x00]);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.raw");
        let img = Gray8::from_fn(16, 8, |x, y| [(x * 16 + y) as u8]);
        write(&path, &img).unwrap();
        let back = read(&path, &RawSpec::new(16, 8)).unwrap().into_gray8();
        assert_eq!(back, img);
    }

    #[test]
    fn test_u16_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.raw");
        let img = Gray16::from_fn(4, 2, |x, y| [(x as u16) << 12 | y as u16]);
        write_u16(&path, &img, ByteOrder::Big).unwrap();
        let spec = RawSpec::new(4, 2)
            .with_depth(SampleDepth::U16)
            .with_byte_order(ByteOrder::Big);
        match read(&path, &spec).unwrap() {
            RawImage::U16(back) => assert_eq!(back, img),
            other => panic!("unexpected {:?}", other),
        }
    }
}
