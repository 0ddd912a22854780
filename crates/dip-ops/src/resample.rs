//! Subsampling and nearest-neighbor interpolation.
//!
//! # Example
//!
//! ```rust
//! use dip_core::Gray8;
//! use dip_ops::resample::{subsample, upscale_nearest};
//!
//! let img = Gray8::from_fn(640, 480, |x, y| [((x + y) % 256) as u8]);
//! let small = subsample(&img, 4).unwrap();
//! assert_eq!(small.dimensions(), (160, 120));
//!
//! let back = upscale_nearest(&small, 640, 480).unwrap();
//! assert_eq!(back.get(5, 7), img.get(4, 4));
//! ```

use crate::{OpsError, OpsResult};
use dip_core::{Image, Sample};
use tracing::trace;

/// Keeps every `factor`-th row and column, starting at (0, 0).
///
/// The output is `ceil(w / factor) x ceil(h / factor)`.
pub fn subsample<T: Sample, const N: usize>(
    img: &Image<T, N>,
    factor: u32,
) -> OpsResult<Image<T, N>> {
    if factor == 0 {
        return Err(OpsError::InvalidParameter("subsample factor must be >= 1".into()));
    }
    trace!(width = img.width(), height = img.height(), factor, "subsample");

    let w = img.width().div_ceil(factor);
    let h = img.height().div_ceil(factor);
    Ok(Image::from_fn(w, h, |x, y| img.pixel(x * factor, y * factor)))
}

/// Resizes to `width x height` by nearest-neighbor lookup.
///
/// Output pixel (x, y) reads source
/// `(floor(x * src_w / width), floor(y * src_h / height))`.
pub fn upscale_nearest<T: Sample, const N: usize>(
    img: &Image<T, N>,
    width: u32,
    height: u32,
) -> OpsResult<Image<T, N>> {
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "target size {}x{} must be non-zero",
            width, height
        )));
    }
    if img.is_empty() {
        return Err(OpsError::InvalidDimensions("source image is empty".into()));
    }
    trace!(
        src_w = img.width(),
        src_h = img.height(),
        width,
        height,
        "upscale_nearest"
    );

    let (sw, sh) = (img.width() as u64, img.height() as u64);
    Ok(Image::from_fn(width, height, |x, y| {
        let sx = (x as u64 * sw / width as u64) as u32;
        let sy = (y as u64 * sh / height as u64) as u32;
        img.pixel(sx, sy)
    }))
}

/// Pixel replication: each source pixel becomes an `fx x fy` block.
pub fn replicate<T: Sample, const N: usize>(
    img: &Image<T, N>,
    fy: u32,
    fx: u32,
) -> OpsResult<Image<T, N>> {
    if fx == 0 || fy == 0 {
        return Err(OpsError::InvalidParameter("replication factors must be >= 1".into()));
    }
    let width = img
        .width()
        .checked_mul(fx)
        .ok_or_else(|| OpsError::InvalidDimensions("replicated width overflows".into()))?;
    let height = img
        .height()
        .checked_mul(fy)
        .ok_or_else(|| OpsError::InvalidDimensions("replicated height overflows".into()))?;
    Ok(Image::from_fn(width, height, |x, y| img.pixel(x / fx, y / fy)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dip_core::{Gray8, Rgb8};

    fn ramp(w: u32, h: u32) -> Gray8 {
        Gray8::from_fn(w, h, |x, y| [(y * w + x) as u8])
    }

    #[test]
    fn test_subsample_picks_grid() {
        let img = ramp(10, 7);
        let s = subsample(&img, 4).unwrap();
        assert_eq!(s.dimensions(), (3, 2));
        assert_eq!(s.get(2, 1), img.get(8, 4));
        assert!(subsample(&img, 0).is_err());
    }

    #[test]
    fn test_subsample_factor_one_is_identity() {
        let img = ramp(5, 3);
        assert_eq!(subsample(&img, 1).unwrap(), img);
    }

    #[test]
    fn test_upscale_matches_replication_for_integer_ratio() {
        let img = ramp(4, 3);
        let up = upscale_nearest(&img, 16, 12).unwrap();
        assert_eq!(up, replicate(&img, 4, 4).unwrap());
    }

    #[test]
    fn test_upscale_back_to_source_size() {
        let img = ramp(640 / 16, 480 / 16);
        let up = upscale_nearest(&img, 640, 480).unwrap();
        assert_eq!(up.dimensions(), (640, 480));
        assert_eq!(up.get(639, 479), img.get(39, 29));
        assert_eq!(up.get(17, 0), img.get(1, 0));
    }

    #[test]
    fn test_non_integer_ratio() {
        let img = ramp(3, 1);
        let up = upscale_nearest(&img, 7, 1).unwrap();
        // floor(x * 3 / 7)
        assert_eq!(up.data(), &[0, 0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn test_rgb_subsample() {
        let img = Rgb8::from_fn(4, 4, |x, y| [x as u8, y as u8, 9]);
        let s = subsample(&img, 2).unwrap();
        assert_eq!(s.pixel(1, 1), [2, 2, 9]);
    }

    #[test]
    fn test_invalid_targets() {
        let img = ramp(4, 4);
        assert!(upscale_nearest(&img, 0, 4).is_err());
        assert!(upscale_nearest(&Gray8::new(0, 0), 4, 4).is_err());
        assert!(replicate(&img, 0, 1).is_err());
    }
}
