//! Gray-level histograms and histogram equalization.
//!
//! Equalization maps each level through the normalized cumulative
//! histogram:
//!
//! ```text
//! s(r) = (cdf(r) - cdf_min) * (L-1) / (cdf_max - cdf_min)
//! ```
//!
//! `cdf_min` is the smallest entry of the cumulative array, i.e. the count
//! at level 0. The quotient is truncated.

use crate::tone::Lut;
use dip_core::{Gray8, LEVELS};
use tracing::{debug, warn};

/// 256-bin histogram of an 8-bit image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; LEVELS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self { bins: [0; LEVELS] }
    }
}

impl Histogram {
    /// Counts the levels of `img`.
    pub fn from_image(img: &Gray8) -> Self {
        let mut bins = [0u64; LEVELS];
        for &v in img.data() {
            bins[v as usize] += 1;
        }
        Self { bins }
    }

    /// Number of pixels at `level`.
    #[inline]
    pub fn count(&self, level: u8) -> u64 {
        self.bins[level as usize]
    }

    /// All bins.
    #[inline]
    pub fn bins(&self) -> &[u64; LEVELS] {
        &self.bins
    }

    /// Total number of counted pixels.
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Tallest bin.
    pub fn max_count(&self) -> u64 {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    /// Cumulative counts; `cdf[r]` is the number of pixels at or below `r`.
    pub fn cdf(&self) -> [u64; LEVELS] {
        let mut cdf = [0u64; LEVELS];
        let mut acc = 0u64;
        for (slot, &count) in cdf.iter_mut().zip(self.bins.iter()) {
            acc += count;
            *slot = acc;
        }
        cdf
    }

    /// Bin heights as a curve for plotting.
    pub fn to_curve(&self) -> Vec<f32> {
        self.bins.iter().map(|&c| c as f32).collect()
    }
}

/// Builds the equalization table for `hist`.
///
/// An image with every pixel at level 0 (or no pixels) has a flat
/// cumulative histogram; the identity table is returned.
pub fn equalization_lut(hist: &Histogram) -> Lut {
    let cdf = hist.cdf();
    let cdf_min = cdf[0];
    let cdf_max = cdf[LEVELS - 1];
    if cdf_max == cdf_min {
        warn!(pixels = cdf_max, "flat cumulative histogram, equalization is identity");
        return Lut::identity();
    }
    let range = cdf_max - cdf_min;
    debug!(cdf_min, cdf_max, "equalization table");
    Lut::from_fn(|r| {
        let scaled = (cdf[r as usize] - cdf_min) * (LEVELS as u64 - 1) / range;
        scaled as u8
    })
}

/// Equalizes `img`, returning the result and the table that produced it.
///
/// # Example
///
/// ```rust
/// use dip_core::Gray8;
/// use dip_ops::histogram::equalize;
///
/// // Two levels squeezed into the dark end spread to the full range.
/// let img = Gray8::from_fn(4, 4, |x, _| [if x < 2 { 10 } else { 20 }]);
/// let (eq, lut) = equalize(&img);
/// assert_eq!(lut.get(20), 255);
/// assert_eq!(eq.get(3, 0), 255);
/// ```
pub fn equalize(img: &Gray8) -> (Gray8, Lut) {
    let lut = equalization_lut(&Histogram::from_image(img));
    (lut.apply(img), lut)
}
