//! Laplacian edge response and sharpening.
//!
//! The Laplacian used here has a negative centre, so sharpening subtracts
//! it: `g = f - lap`.
//!
//! ```rust
//! use dip_core::Gray8;
//! use dip_ops::sharpen::{laplacian, scale_to_display, sharpen, LaplacianScaling};
//! use dip_ops::BorderMode;
//!
//! let img = Gray8::from_fn(32, 32, |x, _| [if x < 16 { 60 } else { 180 }]);
//! let lap = laplacian(&img, BorderMode::ZERO).unwrap();
//! let display = scale_to_display(&lap, LaplacianScaling::Saturate);
//! let sharp = sharpen(&img, &display).unwrap();
//! assert_eq!(sharp.dimensions(), img.dimensions());
//! ```

use crate::filter::{convolve, Kernel};
use crate::{BorderMode, OpsError, OpsResult};
use dip_core::{Gray8, GrayF};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// How a signed Laplacian response is brought into 0..255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaplacianScaling {
    /// Shift so the minimum is 0, then scale the maximum to 255.
    Shift,
    /// Round and clamp to 0..=255 like an 8-bit filter output, then scale
    /// the maximum to 255.
    #[default]
    Saturate,
}

impl FromStr for LaplacianScaling {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "shift" => Ok(Self::Shift),
            "saturate" => Ok(Self::Saturate),
            _ => Err(OpsError::InvalidParameter(format!("unknown scaling '{}'", s))),
        }
    }
}

impl fmt::Display for LaplacianScaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shift => "shift",
            Self::Saturate => "saturate",
        })
    }
}

/// 8-neighbour Laplacian response.
pub fn laplacian(img: &Gray8, border: BorderMode) -> OpsResult<GrayF> {
    convolve(img, &Kernel::laplacian(), border)
}

/// Maps a Laplacian response to a displayable 8-bit image.
///
/// A response with no positive spread after scaling maps to all zeros.
pub fn scale_to_display(lap: &GrayF, scaling: LaplacianScaling) -> Gray8 {
    let shifted = match scaling {
        LaplacianScaling::Shift => {
            let lo = lap.min_max().map(|(lo, _)| lo).unwrap_or(0.0);
            lap.map(|v| v - lo)
        }
        LaplacianScaling::Saturate => lap.map(|v| v.round().clamp(0.0, 255.0)),
    };
    let hi = shifted.min_max().map(|(_, hi)| hi).unwrap_or(0.0);
    debug!(%scaling, max = hi, "scaling laplacian");
    if hi <= 0.0 {
        warn!("flat laplacian response");
        return Gray8::new(lap.width(), lap.height());
    }
    shifted.map(|v| (v * 255.0 / hi) as u8)
}

/// Subtracts the displayed Laplacian from `img`, clipping to 0..255.
///
/// # Errors
///
/// Both images must have the same size.
pub fn sharpen(img: &Gray8, lap_display: &Gray8) -> OpsResult<Gray8> {
    if img.dimensions() != lap_display.dimensions() {
        return Err(OpsError::SizeMismatch(format!(
            "image {}x{} vs laplacian {}x{}",
            img.width(),
            img.height(),
            lap_display.width(),
            lap_display.height()
        )));
    }
    let data = img
        .data()
        .iter()
        .zip(lap_display.data())
        .map(|(&f, &l)| f.saturating_sub(l))
        .collect();
    Ok(Gray8::from_data(img.width(), img.height(), data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_image_has_zero_response() {
        let img = Gray8::filled(8, 8, [90]);
        let lap = laplacian(&img, BorderMode::Replicate).unwrap();
        assert!(lap.data().iter().all(|&v| v == 0.0));
        let display = scale_to_display(&lap, LaplacianScaling::Shift);
        assert!(display.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_zero_padding_darkens_border() {
        let img = Gray8::filled(5, 5, [10]);
        let lap = laplacian(&img, BorderMode::ZERO).unwrap();
        // Corner sees 5 zero neighbours: 3 * 10 - 8 * 10
        assert_eq!(lap.get(0, 0), -50.0);
        assert_eq!(lap.get(2, 2), 0.0);
    }

    #[test]
    fn test_scaling_modes() {
        let lap = GrayF::from_data(3, 1, vec![-10.0, 0.0, 30.0]).unwrap();
        let shift = scale_to_display(&lap, LaplacianScaling::Shift);
        assert_eq!(shift.data(), &[0, 63, 255]);
        let sat = scale_to_display(&lap, LaplacianScaling::Saturate);
        assert_eq!(sat.data(), &[0, 0, 255]);
    }

    #[test]
    fn test_saturate_clips_strong_edges() {
        // Columns 0, 60, 255, 255, 60, 0 over three rows.
        let cols = [0u8, 60, 255, 255, 60, 0];
        let img = Gray8::from_fn(6, 3, |x, _| [cols[x as usize]]);
        let lap = laplacian(&img, BorderMode::ZERO).unwrap();
        assert!(lap.data().iter().any(|&v| v > 255.0));

        let display = scale_to_display(&lap, LaplacianScaling::Saturate);
        assert_eq!(&display.data()[..6], &[120, 90, 0, 0, 90, 120]);
        assert_eq!(&display.data()[6..8], &[180, 255]);
        assert_eq!(LaplacianScaling::default(), LaplacianScaling::Saturate);
    }

    #[test]
    fn test_saturate_rounds_to_nearest() {
        let lap = GrayF::from_data(4, 1, vec![-3.0, 10.4, 10.6, 300.0]).unwrap();
        let display = scale_to_display(&lap, LaplacianScaling::Saturate);
        assert_eq!(display.data(), &[0, 10, 11, 255]);
    }

    #[test]
    fn test_sharpen_clips() {
        let img = Gray8::from_data(3, 1, vec![10, 100, 250]).unwrap();
        let lap = Gray8::from_data(3, 1, vec![20, 50, 0]).unwrap();
        assert_eq!(sharpen(&img, &lap).unwrap().data(), &[0, 50, 250]);
        assert!(sharpen(&img, &Gray8::new(2, 1)).is_err());
    }
}
