//! Linear spatial filtering.
//!
//! # Kernels
//!
//! - [`Kernel::box_filter`] - uniform average
//! - [`Kernel::gaussian`] - normalized Gaussian low-pass
//! - [`Kernel::laplacian`] - 8-neighbour Laplacian (centre -8)
//! - [`Kernel::laplacian4`] - 4-neighbour Laplacian (centre -4)
//!
//! [`convolve`] is a correlation: the kernel is applied as stored, without
//! flipping. All kernels here are symmetric so the distinction only matters
//! for user-supplied ones.
//!
//! # Example
//!
//! ```rust
//! use dip_core::Gray8;
//! use dip_ops::filter::{convolve, Kernel};
//! use dip_ops::BorderMode;
//!
//! let img = Gray8::filled(16, 16, [100]);
//! let kernel = Kernel::gaussian(5, 1.5).unwrap();
//! let blurred = convolve(&img, &kernel, BorderMode::Replicate).unwrap();
//! assert!((blurred.get(0, 0) - 100.0).abs() < 1e-3);
//! ```

use crate::parallel::for_each_row;
use crate::{BorderMode, OpsError, OpsResult};
use dip_core::{Gray, Gray8, GrayF, Sample};
use std::fmt;
use tracing::{debug, trace};

/// Side length of a square sliding window: a positive odd integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowSize(usize);

impl WindowSize {
    /// Validates `size`.
    ///
    /// ```rust
    /// use dip_ops::filter::WindowSize;
    ///
    /// assert_eq!(WindowSize::new(7).unwrap().radius(), 3);
    /// assert!(WindowSize::new(4).is_err());
    /// assert!(WindowSize::new(0).is_err());
    /// ```
    pub fn new(size: usize) -> OpsResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "window size must be a positive odd integer, got {}",
                size
            )));
        }
        Ok(Self(size))
    }

    /// Side length.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Half side length.
    #[inline]
    pub fn radius(self) -> usize {
        self.0 / 2
    }

    /// Number of samples in the window.
    #[inline]
    pub fn area(self) -> usize {
        self.0 * self.0
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// Convolution kernel for image filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Kernel weights, row-major.
    pub data: Vec<f32>,
    /// Kernel width (must be odd).
    pub width: usize,
    /// Kernel height (must be odd).
    pub height: usize,
}

impl Kernel {
    /// Creates a new kernel from data.
    ///
    /// Width and height must be odd numbers.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> OpsResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(OpsError::InvalidParameter(
                "kernel dimensions must be odd".into(),
            ));
        }
        if data.len() != width * height {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { data, width, height })
    }

    /// Creates a uniform averaging kernel.
    pub fn box_filter(size: usize) -> OpsResult<Self> {
        let size = WindowSize::new(size)?;
        let count = size.area();
        Ok(Self {
            data: vec![1.0 / count as f32; count],
            width: size.get(),
            height: size.get(),
        })
    }

    /// Creates a Gaussian kernel normalized to sum 1.
    ///
    /// # Arguments
    ///
    /// * `size` - side length, positive odd
    /// * `sigma` - standard deviation in pixels, > 0
    pub fn gaussian(size: usize, sigma: f32) -> OpsResult<Self> {
        let size = WindowSize::new(size)?;
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "sigma must be finite and > 0, got {}",
                sigma
            )));
        }
        let half = size.radius() as i32;
        let sigma2 = 2.0 * sigma as f64 * sigma as f64;

        let mut weights = Vec::with_capacity(size.area());
        for y in -half..=half {
            for x in -half..=half {
                let d = (x * x + y * y) as f64;
                weights.push((-d / sigma2).exp());
            }
        }
        let sum: f64 = weights.iter().sum();

        Ok(Self {
            data: weights.into_iter().map(|w| (w / sum) as f32).collect(),
            width: size.get(),
            height: size.get(),
        })
    }

    /// 8-neighbour Laplacian.
    ///
    /// ```text
    /// 1  1  1
    /// 1 -8  1
    /// 1  1  1
    /// ```
    pub fn laplacian() -> Self {
        Self {
            data: vec![
                1.0, 1.0, 1.0,
                1.0, -8.0, 1.0,
                1.0, 1.0, 1.0,
            ],
            width: 3,
            height: 3,
        }
    }

    /// 4-neighbour Laplacian.
    pub fn laplacian4() -> Self {
        Self {
            data: vec![
                0.0, 1.0, 0.0,
                1.0, -4.0, 1.0,
                0.0, 1.0, 0.0,
            ],
            width: 3,
            height: 3,
        }
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Weight at (x, y).
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Kernel as an 8-bit image, min to 0 and max to 255.
    pub fn to_image(&self) -> Gray8 {
        let (lo, hi) = self
            .data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let span = hi - lo;
        Gray8::from_fn(self.width as u32, self.height as u32, |x, y| {
            let v = self.at(x as usize, y as usize);
            if span > 0.0 {
                [((v - lo) / span * 255.0) as u8]
            } else {
                [0]
            }
        })
    }
}

/// Correlates `img` with `kernel`, returning the unclipped response.
pub fn convolve<T: Sample>(img: &Gray<T>, kernel: &Kernel, border: BorderMode) -> OpsResult<GrayF> {
    trace!(
        width = img.width(),
        height = img.height(),
        kernel_w = kernel.width,
        kernel_h = kernel.height,
        %border,
        "convolve"
    );
    if kernel.data.len() != kernel.width * kernel.height {
        return Err(OpsError::InvalidParameter(format!(
            "kernel data size {} doesn't match {}x{}",
            kernel.data.len(),
            kernel.width,
            kernel.height
        )));
    }

    let width = img.width() as usize;
    let (rx, ry) = kernel.radius();
    let mut dst = GrayF::new(img.width(), img.height());

    for_each_row(dst.data_mut(), width, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let mut sum = 0.0f64;
            for ky in 0..kernel.height {
                let sy = y as isize + ky as isize - ry as isize;
                for kx in 0..kernel.width {
                    let sx = x as isize + kx as isize - rx as isize;
                    sum += border.fetch(img, sx, sy) as f64 * kernel.data[ky * kernel.width + kx] as f64;
                }
            }
            *out = sum as f32;
        }
    });

    Ok(dst)
}

/// Clips a float image to 0..255 and truncates.
pub fn clip_to_u8(img: &GrayF) -> Gray8 {
    img.convert()
}

/// Clips a float image to 0..255 and rounds to nearest.
pub fn round_to_u8(img: &GrayF) -> Gray8 {
    img.map(|v| u8::round_from_f64(v as f64))
}

/// Box-filter average over a `size x size` window, clipped and truncated.
///
/// The window sum is divided once, so a flat region keeps its exact level.
pub fn mean_filter(img: &Gray8, size: usize, border: BorderMode) -> OpsResult<Gray8> {
    let size = WindowSize::new(size)?;
    debug!(%size, %border, "mean filter");

    let width = img.width() as usize;
    let r = size.radius() as isize;
    let area = size.area() as f64;
    let mut dst = Gray8::new(img.width(), img.height());

    for_each_row(dst.data_mut(), width, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let mut sum = 0.0f64;
            for dy in -r..=r {
                for dx in -r..=r {
                    sum += border.fetch(img, x as isize + dx, y as isize + dy) as f64;
                }
            }
            *out = u8::from_f64(sum / area);
        }
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kernel_validation() {
        assert!(Kernel::new(vec![0.0; 4], 2, 2).is_err());
        assert!(Kernel::new(vec![0.0; 8], 3, 3).is_err());
        assert!(Kernel::new(vec![0.0; 15], 5, 3).is_ok());
        assert!(Kernel::box_filter(10).is_err());
        assert!(Kernel::gaussian(5, 0.0).is_err());
    }

    #[test]
    fn test_gaussian_normalized_and_peaked() {
        let k = Kernel::gaussian(31, 7.0).unwrap();
        assert_relative_eq!(k.sum(), 1.0, epsilon = 1e-5);
        let centre = k.at(15, 15);
        assert!(k.data.iter().all(|&w| w <= centre));
        assert_relative_eq!(k.at(0, 15), k.at(30, 15), epsilon = 1e-9);
    }

    #[test]
    fn test_laplacian_sums_to_zero() {
        assert_eq!(Kernel::laplacian().sum(), 0.0);
        assert_eq!(Kernel::laplacian4().sum(), 0.0);
    }

    #[test]
    fn test_convolve_is_correlation() {
        // Asymmetric kernel picks the right neighbour.
        let k = Kernel::new(vec![0.0, 0.0, 1.0], 3, 1).unwrap();
        let img = Gray8::from_data(4, 1, vec![1, 2, 3, 4]).unwrap();
        let out = convolve(&img, &k, BorderMode::ZERO).unwrap();
        assert_eq!(out.data(), &[2.0, 3.0, 4.0, 0.0]);
    }

    #[test]
    fn test_mean_filter_flat_image_unchanged() {
        let img = Gray8::filled(20, 20, [77]);
        let out = mean_filter(&img, 11, BorderMode::Replicate).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_mean_filter_truncates() {
        // 3x3 window over [0, 0, 10] rows: 30/9 = 3.33
        let img = Gray8::from_fn(3, 3, |x, _| [if x == 2 { 10 } else { 0 }]);
        let out = mean_filter(&img, 3, BorderMode::ZERO).unwrap();
        assert_eq!(out.get(1, 1), 3);
        assert!(mean_filter(&img, 2, BorderMode::ZERO).is_err());
    }

    #[test]
    fn test_kernel_to_image() {
        let img = Kernel::laplacian().to_image();
        assert_eq!(img.get(1, 1), 0);
        assert_eq!(img.get(0, 0), 255);
    }

    #[test]
    fn test_rounding_helpers() {
        let f = GrayF::from_data(3, 1, vec![-5.0, 2.5, 300.0]).unwrap();
        assert_eq!(clip_to_u8(&f).data(), &[0, 2, 255]);
        assert_eq!(round_to_u8(&f).data(), &[0, 3, 255]);
    }
}
