//! Blur degradation and frequency-domain restoration.
//!
//! The degradation model is `g = h * f` with `h` a Gaussian point spread
//! function (PSF). Restoration divides by a regularized transfer function:
//!
//! ```text
//! F'(u, v) = conj(H) / (|H|^2 + K) * G(u, v)
//! ```
//!
//! `K = 0` is the plain inverse filter, which blows up wherever `H` is tiny;
//! a small positive `K` (default `1e-3`) keeps the result bounded.
//!
//! # Example
//!
//! ```rust,ignore
//! use dip_ops::restore::{degrade, gaussian_psf, inverse_filter, DEFAULT_K};
//!
//! let psf = gaussian_psf(31, 7.0)?;
//! let blurred = degrade(&img, &psf)?;
//! let restored = inverse_filter(&blurred, &psf, DEFAULT_K)?;
//! ```

use crate::filter::{convolve, round_to_u8, Kernel};
use crate::spectrum::Spectrum;
use crate::{BorderMode, OpsError, OpsResult};
use dip_core::{Gray8, GrayF64};
use num_complex::Complex;
use tracing::{debug, trace};

/// Regularization constant used by the exercise.
pub const DEFAULT_K: f64 = 1e-3;

/// Normalized Gaussian PSF of side `size`.
pub fn gaussian_psf(size: usize, sigma: f32) -> OpsResult<Kernel> {
    Kernel::gaussian(size, sigma)
}

/// Blurs `img` with `psf` (mirrored borders without edge repeat), rounding
/// to the nearest level.
pub fn degrade(img: &Gray8, psf: &Kernel) -> OpsResult<Gray8> {
    debug!(psf_w = psf.width, psf_h = psf.height, "degrading");
    Ok(round_to_u8(&convolve(img, psf, BorderMode::Reflect101)?))
}

/// Transfer function of `psf` on a `width x height` grid.
///
/// The kernel centre is placed at (0, 0) and the rest wraps around, so the
/// PSF introduces no shift.
pub fn psf_to_otf(psf: &Kernel, width: usize, height: usize) -> OpsResult<Spectrum> {
    if psf.width > width || psf.height > height {
        return Err(OpsError::InvalidDimensions(format!(
            "psf {}x{} larger than image {}x{}",
            psf.width, psf.height, width, height
        )));
    }
    let (rx, ry) = psf.radius();
    let mut padded = GrayF64::new(width as u32, height as u32);
    for ky in 0..psf.height {
        let dy = (ky as isize - ry as isize).rem_euclid(height as isize) as u32;
        for kx in 0..psf.width {
            let dx = (kx as isize - rx as isize).rem_euclid(width as isize) as u32;
            padded.set(dx, dy, psf.at(kx, ky) as f64);
        }
    }
    Spectrum::forward(&padded)
}

/// Restores `degraded` by regularized inverse filtering.
///
/// # Errors
///
/// `k` must be finite and non-negative, and the PSF must fit the image.
pub fn inverse_filter(degraded: &Gray8, psf: &Kernel, k: f64) -> OpsResult<GrayF64> {
    if !k.is_finite() || k < 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "regularization must be finite and >= 0, got {}",
            k
        )));
    }
    let (width, height) = (degraded.width() as usize, degraded.height() as usize);
    trace!(width, height, k, "inverse filter");

    let otf = psf_to_otf(psf, width, height)?;
    let mut restored = Spectrum::forward(degraded)?;
    for (g, h) in restored.data_mut().iter_mut().zip(otf.data()) {
        let denom = h.norm_sqr() + k;
        *g = if denom == 0.0 {
            Complex::new(0.0, 0.0)
        } else {
            h.conj() / denom * *g
        };
    }
    Ok(restored.inverse())
}

/// Clips a restored image to 0..255 for display (truncating).
pub fn to_display(img: &GrayF64) -> Gray8 {
    img.convert()
}
