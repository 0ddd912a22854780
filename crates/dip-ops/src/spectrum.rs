//! Discrete Fourier transform of gray images.
//!
//! The 2D transform is computed as a 1D FFT over every row followed by a
//! 1D FFT over every column. The forward transform is unnormalized and the
//! inverse divides by `width * height`, so `inverse(forward(f)) == f`.
//!
//! # Example
//!
//! ```rust
//! use dip_core::Gray8;
//! use dip_ops::spectrum::{log_magnitude, Spectrum};
//!
//! let img = Gray8::from_fn(64, 32, |x, _| [if x % 8 < 4 { 200 } else { 40 }]);
//! let spec = Spectrum::forward(&img).unwrap();
//! // DC term is the sum of all samples.
//! assert!((spec.get(0, 0).re - 120.0 * 64.0 * 32.0).abs() < 1e-6);
//!
//! let shown = log_magnitude(&img).unwrap();
//! assert_eq!(shown.get(32, 16), 255);
//! ```

use crate::{OpsError, OpsResult};
use dip_core::{Gray, Gray8, GrayF64, Sample};
use num_complex::Complex;
use rustfft::{FftDirection, FftPlanner};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Complex 2D spectrum, row-major, `width` samples per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    width: usize,
    height: usize,
    data: Vec<Complex<f64>>,
}

/// In-place 2D FFT over a row-major buffer.
fn transform_2d(data: &mut [Complex<f64>], width: usize, height: usize, direction: FftDirection) {
    let mut planner = FftPlanner::<f64>::new();

    let row_fft = planner.plan_fft(width, direction);
    let mut scratch = vec![Complex::new(0.0, 0.0); row_fft.get_inplace_scratch_len()];
    for row in data.chunks_exact_mut(width) {
        row_fft.process_with_scratch(row, &mut scratch);
    }

    let col_fft = planner.plan_fft(height, direction);
    let mut scratch = vec![Complex::new(0.0, 0.0); col_fft.get_inplace_scratch_len()];
    let mut column = vec![Complex::new(0.0, 0.0); height];
    for x in 0..width {
        for (y, slot) in column.iter_mut().enumerate() {
            *slot = data[y * width + x];
        }
        col_fft.process_with_scratch(&mut column, &mut scratch);
        for (y, value) in column.iter().enumerate() {
            data[y * width + x] = *value;
        }
    }
}

impl Spectrum {
    /// Wraps existing coefficients.
    pub fn from_data(width: usize, height: usize, data: Vec<Complex<f64>>) -> OpsResult<Self> {
        if data.len() != width * height {
            return Err(OpsError::InvalidDimensions(format!(
                "expected {} coefficients, got {}",
                width * height,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Forward 2D DFT of a gray image.
    pub fn forward<T: Sample>(img: &Gray<T>) -> OpsResult<Self> {
        if img.is_empty() {
            return Err(OpsError::InvalidDimensions("cannot transform an empty image".into()));
        }
        let (width, height) = (img.width() as usize, img.height() as usize);
        trace!(width, height, "forward dft");

        let mut data: Vec<Complex<f64>> = img
            .data()
            .iter()
            .map(|&v| Complex::new(v.to_f64(), 0.0))
            .collect();
        transform_2d(&mut data, width, height, FftDirection::Forward);
        Ok(Self { width, height, data })
    }

    /// Inverse 2D DFT, keeping the real part.
    pub fn inverse(&self) -> GrayF64 {
        trace!(width = self.width, height = self.height, "inverse dft");
        let mut data = self.data.clone();
        transform_2d(&mut data, self.width, self.height, FftDirection::Inverse);
        let scale = 1.0 / (self.width * self.height) as f64;
        GrayF64::from_fn(self.width as u32, self.height as u32, |x, y| {
            [data[y as usize * self.width + x as usize].re * scale]
        })
    }

    /// Width (number of horizontal frequencies).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height (number of vertical frequencies).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Coefficients, row-major.
    #[inline]
    pub fn data(&self) -> &[Complex<f64>] {
        &self.data
    }

    /// Mutable coefficients.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.data
    }

    /// Coefficient at horizontal frequency `u`, vertical frequency `v`.
    #[inline]
    pub fn get(&self, u: usize, v: usize) -> Complex<f64> {
        self.data[v * self.width + u]
    }

    /// Moves the zero frequency to the centre (`fftshift`).
    pub fn shifted(&self) -> Self {
        let (w, h) = (self.width, self.height);
        let (sx, sy) = ((w + 1) / 2, (h + 1) / 2);
        let mut data = Vec::with_capacity(self.data.len());
        for y in 0..h {
            let src_y = (y + sy) % h;
            for x in 0..w {
                data.push(self.data[src_y * w + (x + sx) % w]);
            }
        }
        Self { width: w, height: h, data }
    }

    /// `|F(u, v)|` as an image.
    pub fn magnitude(&self) -> GrayF64 {
        GrayF64::from_fn(self.width as u32, self.height as u32, |x, y| {
            [self.get(x as usize, y as usize).norm()]
        })
    }

    /// Element-wise product.
    pub fn mul(&self, other: &Spectrum) -> OpsResult<Spectrum> {
        if (self.width, self.height) != (other.width, other.height) {
            return Err(OpsError::SizeMismatch(format!(
                "spectrum {}x{} vs {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        let data = self.data.iter().zip(&other.data).map(|(a, b)| a * b).collect();
        Ok(Self {
            width: self.width,
            height: self.height,
            data,
        })
    }
}

/// Scales a non-negative image so its maximum becomes 255 (truncating).
///
/// An all-zero image stays zero.
pub fn normalize_to_u8(img: &GrayF64) -> Gray8 {
    let hi = img.min_max().map(|(_, hi)| hi).unwrap_or(0.0);
    if hi <= 0.0 {
        return Gray8::new(img.width(), img.height());
    }
    img.map(|v| (v / hi * 255.0).clamp(0.0, 255.0) as u8)
}

/// Centred log-magnitude spectrum for display: `log(1 + |F|)`, max to 255.
pub fn log_magnitude<T: Sample>(img: &Gray<T>) -> OpsResult<Gray8> {
    let magnitude = Spectrum::forward(img)?.shifted().magnitude();
    Ok(normalize_to_u8(&magnitude.map(f64::ln_1p)))
}

/// Closed-form frequency responses of two 3x3 spatial masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyResponse {
    /// 4-neighbour average without centre:
    /// `H = 0.5 (cos 2πu/M + cos 2πv/N)`.
    Averaging,
    /// 4-neighbour Laplacian: `H = 2 cos 2πu/M + 2 cos 2πv/N - 4`.
    Laplacian,
}

impl FrequencyResponse {
    /// Both responses.
    pub const ALL: [FrequencyResponse; 2] = [Self::Averaging, Self::Laplacian];

    /// `H(u, v)` for an `m x n` transform.
    pub fn evaluate(self, u: usize, v: usize, m: usize, n: usize) -> f64 {
        let cu = (2.0 * PI * u as f64 / m as f64).cos();
        let cv = (2.0 * PI * v as f64 / n as f64).cos();
        match self {
            Self::Averaging => 0.5 * (cu + cv),
            Self::Laplacian => 2.0 * cu + 2.0 * cv - 4.0,
        }
    }

    /// `|H(u, v)|` with `u` along x (width `m`) and `v` along y (height `n`).
    pub fn magnitude(self, m: usize, n: usize) -> GrayF64 {
        GrayF64::from_fn(m as u32, n as u32, |u, v| {
            [self.evaluate(u as usize, v as usize, m, n).abs()]
        })
    }

    /// `|H|` scaled so its maximum is 255.
    pub fn display(self, m: usize, n: usize) -> Gray8 {
        normalize_to_u8(&self.magnitude(m, n))
    }
}

impl fmt::Display for FrequencyResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Averaging => "averaging",
            Self::Laplacian => "laplacian",
        })
    }
}

impl FromStr for FrequencyResponse {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "averaging" | "average" => Ok(Self::Averaging),
            "laplacian" => Ok(Self::Laplacian),
            _ => Err(OpsError::InvalidParameter(format!("unknown response '{}'", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roundtrip() {
        let img = Gray8::from_fn(12, 7, |x, y| [(x * 17 + y * 31) as u8]);
        let back = Spectrum::forward(&img).unwrap().inverse();
        for (a, b) in img.data().iter().zip(back.data()) {
            assert_relative_eq!(*a as f64, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_impulse_has_flat_spectrum() {
        let mut img = Gray8::new(8, 8);
        img.set(0, 0, 1);
        let spec = Spectrum::forward(&img).unwrap();
        assert!(spec.data().iter().all(|c| (c.norm() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_single_frequency() {
        // cos(2πx·2/16) has energy at u = 2 and u = 14 only.
        let img = GrayF64::from_fn(16, 4, |x, _| [(2.0 * PI * 2.0 * x as f64 / 16.0).cos()]);
        let mag = Spectrum::forward(&img).unwrap().magnitude();
        assert_relative_eq!(mag.get(2, 0), 32.0, epsilon = 1e-9);
        assert_relative_eq!(mag.get(14, 0), 32.0, epsilon = 1e-9);
        assert_relative_eq!(mag.get(3, 0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shift_even_and_odd() {
        let data: Vec<_> = (0..5).map(|i| Complex::new(i as f64, 0.0)).collect();
        let s = Spectrum::from_data(5, 1, data).unwrap().shifted();
        let re: Vec<f64> = s.data().iter().map(|c| c.re).collect();
        assert_eq!(re, vec![3.0, 4.0, 0.0, 1.0, 2.0]);

        let data: Vec<_> = (0..4).map(|i| Complex::new(i as f64, 0.0)).collect();
        let s = Spectrum::from_data(1, 4, data).unwrap().shifted();
        let re: Vec<f64> = s.data().iter().map(|c| c.re).collect();
        assert_eq!(re, vec![2.0, 3.0, 0.0, 1.0]);
    }

    #[test]
    fn test_log_magnitude_peaks_at_centre() {
        let img = Gray8::filled(10, 6, [50]);
        let shown = log_magnitude(&img).unwrap();
        assert_eq!(shown.get(5, 3), 255);
        assert_eq!(shown.get(0, 0), 0);
    }

    #[test]
    fn test_mul_size_mismatch() {
        let a = Spectrum::forward(&Gray8::new(4, 4)).unwrap();
        let b = Spectrum::forward(&Gray8::new(4, 2)).unwrap();
        assert!(a.mul(&b).is_err());
        assert_eq!(a.mul(&a).unwrap().width(), 4);
    }

    #[test]
    fn test_frequency_responses() {
        let avg = FrequencyResponse::Averaging;
        let lap = FrequencyResponse::Laplacian;
        assert_relative_eq!(avg.evaluate(0, 0, 256, 256), 1.0);
        assert_relative_eq!(lap.evaluate(0, 0, 256, 256), 0.0);
        assert_relative_eq!(lap.evaluate(128, 128, 256, 256), -8.0, epsilon = 1e-12);

        let shown = lap.display(256, 256);
        assert_eq!(shown.get(128, 128), 255);
        assert_eq!(shown.get(0, 0), 0);
        assert_eq!(avg.display(256, 256).get(0, 0), 255);
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(Spectrum::forward(&Gray8::new(0, 3)).is_err());
    }
}
