//! # dip-io
//!
//! Reading and writing the images the exercises work on.
//!
//! - [`raw`] - headerless row-major dumps with a caller-supplied geometry
//! - [`png`] - 8-bit PNG output (and input, for convenience)
//! - [`detect`] - format detection by extension and magic bytes
//!
//! The top-level [`load_gray`], [`save_gray`] and [`save_rgb`] dispatch on
//! the detected format.
//!
//! # Example
//!
//! ```rust,ignore
//! use dip_io::{load_gray, save_gray, RawSpec};
//!
//! let img = load_gray("cat.raw", &RawSpec::default())?;
//! save_gray("cat.png", &img)?;
//! ```

#![warn(missing_docs)]

pub mod detect;
pub mod error;
#[cfg(feature = "png")]
pub mod png;
pub mod raw;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use raw::{ByteOrder, RawImage, RawSpec, SampleDepth};

use dip_core::{Gray8, Rgb8};
use std::path::Path;
use tracing::{debug, info};

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    )
}

/// Loads an image as 8-bit gray.
///
/// Raw files are decoded with `spec`; PNG files ignore it and are collapsed
/// to gray by averaging bands.
pub fn load_gray<P: AsRef<Path>>(path: P, spec: &RawSpec) -> IoResult<Gray8> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), ?format, "loading");

    match format {
        Format::Raw => Ok(raw::read(path, spec)?.into_gray8()),
        #[cfg(feature = "png")]
        Format::Png => Ok(png::read(path)?.into_gray()),
        _ => Err(unsupported(path)),
    }
}

/// Saves an 8-bit gray image, choosing the format from the extension.
pub fn save_gray<P: AsRef<Path>>(path: P, image: &Gray8) -> IoResult<()> {
    let path = path.as_ref();
    match Format::from_extension(path) {
        Format::Raw => raw::write(path, image)?,
        #[cfg(feature = "png")]
        Format::Png => png::write_gray(path, image)?,
        _ => return Err(unsupported(path)),
    }
    info!(path = %path.display(), width = image.width(), height = image.height(), "wrote");
    Ok(())
}

/// Saves an 8-bit RGB image, choosing the format from the extension.
pub fn save_rgb<P: AsRef<Path>>(path: P, image: &Rgb8) -> IoResult<()> {
    let path = path.as_ref();
    match Format::from_extension(path) {
        Format::Raw => raw::write_rgb(path, image)?,
        #[cfg(feature = "png")]
        Format::Png => png::write_rgb(path, image)?,
        _ => return Err(unsupported(path)),
    }
    info!(path = %path.display(), width = image.width(), height = image.height(), "wrote");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_raw_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("in.raw");
        let png_path = dir.path().join("out.png");

        let img = Gray8::from_fn(32, 24, |x, y| [(x ^ y) as u8]);
        raw::write(&raw_path, &img).unwrap();

        let loaded = load_gray(&raw_path, &RawSpec::new(32, 24)).unwrap();
        save_gray(&png_path, &loaded).unwrap();
        let back = load_gray(&png_path, &RawSpec::default()).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_raw_starting_with_png_signature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.raw");
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        bytes.resize(16, 7);
        std::fs::write(&path, &bytes).unwrap();

        let img = load_gray(&path, &RawSpec::new(4, 4)).unwrap();
        assert_eq!(img.data(), bytes.as_slice());
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tiff");
        let err = save_gray(&path, &Gray8::new(2, 2)).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }
}
