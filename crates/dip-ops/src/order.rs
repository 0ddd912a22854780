//! Order-statistic and nonlinear mean filters.
//!
//! Each filter slides a `size x size` window over the image and replaces
//! the centre with one statistic of the window samples:
//!
//! | filter            | output                                 |
//! |-------------------|----------------------------------------|
//! | arithmetic        | `mean(x)`                              |
//! | geometric         | `exp(mean(ln(x + 1e-9)))`              |
//! | harmonic          | `n / sum(1 / (x + 1e-6))`              |
//! | contraharmonic Q  | `sum(x^(Q+1)) / sum(x^Q)`, `x + 1e-6`  |
//! | median, max, min  | order statistic                        |
//! | midpoint          | `(max + min) / 2`                      |
//!
//! Results are clipped to 0..255 and truncated. The output has the input's
//! size; window samples outside the image come from the [`BorderMode`].
//!
//! # Example
//!
//! ```rust
//! use dip_core::Gray8;
//! use dip_ops::order::{apply_window_filter, WindowFilter};
//! use dip_ops::BorderMode;
//!
//! let mut img = Gray8::filled(9, 9, [100]);
//! img.set(4, 4, 255); // salt
//! let filter: WindowFilter = "median".parse().unwrap();
//! let clean = apply_window_filter(&img, filter, 3, BorderMode::Reflect).unwrap();
//! assert_eq!(clean.get(4, 4), 100);
//! ```

use crate::filter::WindowSize;
use crate::parallel::for_each_row;
use crate::{BorderMode, OpsError, OpsResult};
use dip_core::Gray8;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

const GEOMETRIC_EPS: f64 = 1e-9;
const HARMONIC_EPS: f64 = 1e-6;

/// Sliding-window statistic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowFilter {
    /// Arithmetic mean.
    Arithmetic,
    /// Geometric mean.
    Geometric,
    /// Harmonic mean.
    Harmonic,
    /// Contraharmonic mean of order `q`. Positive `q` removes pepper noise,
    /// negative `q` removes salt noise.
    Contraharmonic {
        /// Filter order.
        q: f64,
    },
    /// Median.
    Median,
    /// Maximum.
    Max,
    /// Minimum.
    Min,
    /// Midpoint of minimum and maximum.
    Midpoint,
}

impl WindowFilter {
    /// All filters with their conventional names, contraharmonic at Q = +-1.
    pub const ALL: [WindowFilter; 9] = [
        Self::Arithmetic,
        Self::Geometric,
        Self::Harmonic,
        Self::Contraharmonic { q: 1.0 },
        Self::Contraharmonic { q: -1.0 },
        Self::Median,
        Self::Max,
        Self::Min,
        Self::Midpoint,
    ];

    /// Evaluates the statistic over `window`.
    ///
    /// Order statistics reorder `window` in place.
    pub fn evaluate(self, window: &mut [f32]) -> f64 {
        let n = window.len();
        if n == 0 {
            return 0.0;
        }
        match self {
            Self::Arithmetic => window.iter().map(|&v| v as f64).sum::<f64>() / n as f64,
            Self::Geometric => {
                let log_sum: f64 = window.iter().map(|&v| (v as f64 + GEOMETRIC_EPS).ln()).sum();
                (log_sum / n as f64).exp()
            }
            Self::Harmonic => {
                let inv_sum: f64 = window.iter().map(|&v| 1.0 / (v as f64 + HARMONIC_EPS)).sum();
                n as f64 / inv_sum
            }
            Self::Contraharmonic { q } => {
                // Powers of x / max (x / min for negative orders) cannot
                // overflow for any finite order.
                let (lo, hi) = window
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        let x = v as f64 + HARMONIC_EPS;
                        (lo.min(x), hi.max(x))
                    });
                let scale = if q >= 0.0 { hi } else { lo };
                let (num, den) = window.iter().fold((0.0f64, 0.0f64), |(num, den), &v| {
                    let r = (v as f64 + HARMONIC_EPS) / scale;
                    (num + r.powf(q + 1.0), den + r.powf(q))
                });
                let ratio = scale * num / den;
                if ratio.is_finite() { ratio } else { 0.0 }
            }
            Self::Median => {
                let mid = n / 2;
                let (_, m, _) = window.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
                *m as f64
            }
            Self::Max => window.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64,
            Self::Min => window.iter().copied().fold(f32::INFINITY, f32::min) as f64,
            Self::Midpoint => {
                let (lo, hi) = window
                    .iter()
                    .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
                (lo as f64 + hi as f64) / 2.0
            }
        }
    }
}

impl fmt::Display for WindowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arithmetic => f.write_str("arithmetic"),
            Self::Geometric => f.write_str("geometric"),
            Self::Harmonic => f.write_str("harmonic"),
            Self::Contraharmonic { q } if *q == 1.0 => f.write_str("contraharmonic_pos"),
            Self::Contraharmonic { q } if *q == -1.0 => f.write_str("contraharmonic_neg"),
            Self::Contraharmonic { q } => write!(f, "contraharmonic:{}", q),
            Self::Median => f.write_str("median"),
            Self::Max => f.write_str("max"),
            Self::Min => f.write_str("min"),
            Self::Midpoint => f.write_str("midpoint"),
        }
    }
}

impl FromStr for WindowFilter {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let filter = match lower.as_str() {
            "arithmetic" | "mean" => Self::Arithmetic,
            "geometric" => Self::Geometric,
            "harmonic" => Self::Harmonic,
            "contraharmonic_pos" => Self::Contraharmonic { q: 1.0 },
            "contraharmonic_neg" => Self::Contraharmonic { q: -1.0 },
            "median" => Self::Median,
            "max" => Self::Max,
            "min" => Self::Min,
            "midpoint" => Self::Midpoint,
            other => {
                let q = other
                    .strip_prefix("contraharmonic:")
                    .ok_or_else(|| OpsError::InvalidParameter(format!("unknown filter '{}'", s)))?;
                let q: f64 = q
                    .parse()
                    .map_err(|e| OpsError::InvalidParameter(format!("contraharmonic order '{}': {}", q, e)))?;
                if !q.is_finite() {
                    return Err(OpsError::InvalidParameter(format!("contraharmonic order must be finite, got {}", q)));
                }
                Self::Contraharmonic { q }
            }
        };
        Ok(filter)
    }
}

/// Applies `filter` over a `size x size` window.
///
/// # Errors
///
/// `size` must be a positive odd integer.
pub fn apply_window_filter(
    img: &Gray8,
    filter: WindowFilter,
    size: usize,
    border: BorderMode,
) -> OpsResult<Gray8> {
    let size = WindowSize::new(size)?;
    trace!(width = img.width(), height = img.height(), %filter, %size, %border, "window filter");

    let width = img.width() as usize;
    let r = size.radius() as isize;
    let mut dst = Gray8::new(img.width(), img.height());

    for_each_row(dst.data_mut(), width, |y, row| {
        let mut window = Vec::with_capacity(size.area());
        for (x, out) in row.iter_mut().enumerate() {
            window.clear();
            for dy in -r..=r {
                for dx in -r..=r {
                    window.push(border.fetch(img, x as isize + dx, y as isize + dy));
                }
            }
            *out = filter.evaluate(&mut window).clamp(0.0, 255.0) as u8;
        }
    });

    Ok(dst)
}

/// Median over a `size x size` window.
pub fn median_filter(img: &Gray8, size: usize, border: BorderMode) -> OpsResult<Gray8> {
    debug!(size, %border, "median filter");
    apply_window_filter(img, WindowFilter::Median, size, border)
}
