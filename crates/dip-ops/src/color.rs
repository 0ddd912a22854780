//! Color-band composition.
//!
//! An RGB image here is three gray bands that can be built, split and
//! filtered independently.
//!
//! ```rust
//! use dip_core::Gray8;
//! use dip_ops::color::compose_bands;
//!
//! let gray = Gray8::filled(2, 2, [101]);
//! let rgb = compose_bands(&gray, [1.0, 0.5, 0.2]).unwrap();
//! assert_eq!(rgb.pixel(0, 0), [101, 51, 20]);
//! ```

use crate::filter::{convolve, round_to_u8, Kernel};
use crate::{BorderMode, OpsError, OpsResult};
use dip_core::{Gray8, Rgb8, Sample};
use tracing::trace;

/// Collapses RGB to gray by averaging the bands (truncating).
pub fn to_grayscale(img: &Rgb8) -> Gray8 {
    Gray8::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b] = img.pixel(x, y);
        [((r as u16 + g as u16 + b as u16) / 3) as u8]
    })
}

/// Builds an RGB image whose bands are `gray` scaled by `factors`, rounded
/// to the nearest level and clipped to 0..255.
pub fn compose_bands(gray: &Gray8, factors: [f64; 3]) -> OpsResult<Rgb8> {
    if factors.iter().any(|f| !f.is_finite() || *f < 0.0) {
        return Err(OpsError::InvalidParameter(format!(
            "band factors must be finite and >= 0, got {:?}",
            factors
        )));
    }
    trace!(?factors, "compose bands");
    let bands = factors.map(|f| gray.map(|v| u8::round_from_f64(v as f64 * f)));
    Ok(Rgb8::from_channels(&bands)?)
}

/// Splits into R, G, B gray images.
pub fn split_bands(img: &Rgb8) -> OpsResult<[Gray8; 3]> {
    Ok([img.channel(0)?, img.channel(1)?, img.channel(2)?])
}

/// Interleaves three equally sized gray images.
pub fn merge_bands(bands: &[Gray8; 3]) -> OpsResult<Rgb8> {
    Rgb8::from_channels(bands).map_err(|e| OpsError::SizeMismatch(e.to_string()))
}

/// Filters each band separately, rounding to the nearest level.
pub fn filter_bands(img: &Rgb8, kernel: &Kernel, border: BorderMode) -> OpsResult<Rgb8> {
    let [r, g, b] = split_bands(img)?;
    let filtered = [
        round_to_u8(&convolve(&r, kernel, border)?),
        round_to_u8(&convolve(&g, kernel, border)?),
        round_to_u8(&convolve(&b, kernel, border)?),
    ];
    merge_bands(&filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_rounds_to_nearest() {
        let gray = Gray8::from_data(3, 1, vec![0, 255, 3]).unwrap();
        let rgb = compose_bands(&gray, [1.0, 0.5, 0.2]).unwrap();
        assert_eq!(rgb.pixel(1, 0), [255, 128, 51]);
        assert_eq!(rgb.pixel(2, 0), [3, 2, 1]);
        assert!(compose_bands(&gray, [1.0, -0.5, 0.2]).is_err());
    }

    #[test]
    fn test_split_merge() {
        let rgb = Rgb8::from_fn(4, 3, |x, y| [x as u8, y as u8, (x * y) as u8]);
        let bands = split_bands(&rgb).unwrap();
        assert_eq!(bands[2].get(3, 2), 6);
        assert_eq!(merge_bands(&bands).unwrap(), rgb);

        let uneven = [Gray8::new(2, 2), Gray8::new(2, 2), Gray8::new(2, 3)];
        assert!(matches!(merge_bands(&uneven), Err(OpsError::SizeMismatch(_))));
    }

    #[test]
    fn test_filter_bands_keeps_flat_color() {
        let rgb = Rgb8::filled(12, 12, [200, 100, 40]);
        let k = Kernel::gaussian(5, 1.0).unwrap();
        assert_eq!(filter_bands(&rgb, &k, BorderMode::Reflect101).unwrap(), rgb);
    }

    #[test]
    fn test_grayscale_mean() {
        let rgb = Rgb8::filled(1, 1, [255, 128, 51]);
        assert_eq!(to_grayscale(&rgb).get(0, 0), 144);
    }
}
