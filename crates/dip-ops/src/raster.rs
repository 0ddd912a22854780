//! Rasterizing a half-plane, with and without antialiasing.
//!
//! Continuous coordinates have their origin at the bottom-left corner of
//! the grid, x to the right and y up; pixel `(col, row_from_bottom)` covers
//! `[col, col+1) x [row, row+1)`. Image row 0 is the top row.

use crate::{OpsError, OpsResult};
use dip_core::Gray8;
use tracing::trace;

/// Region `y < slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane {
    /// Edge slope.
    pub slope: f64,
    /// Edge intercept at `x = 0`.
    pub intercept: f64,
}

impl HalfPlane {
    /// Half-plane below `y = slope * x + intercept`.
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Whether the continuous point (x, y) lies strictly inside.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        y < self.slope * x + self.intercept
    }
}

/// Samples the half-plane at each pixel centre.
pub fn render_point_sampled(width: u32, height: u32, plane: HalfPlane, fg: u8, bg: u8) -> Gray8 {
    trace!(width, height, ?plane, "point-sampled half-plane");
    Gray8::from_fn(width, height, |col, row| {
        let i = height - 1 - row;
        let inside = plane.contains(col as f64 + 0.5, i as f64 + 0.5);
        [if inside { fg } else { bg }]
    })
}

/// Box-filtered rendering: each pixel takes the covered fraction of a
/// `subsamples x subsamples` grid of sub-pixel centres.
///
/// ```rust
/// use dip_ops::raster::{render_box_filtered, HalfPlane};
///
/// let img = render_box_filtered(10, 10, HalfPlane::new(0.3, 0.0), 255, 0, 100).unwrap();
/// // Bottom-right pixel is mostly covered, top-left not at all.
/// assert!(img.get(9, 9) > 200);
/// assert_eq!(img.get(0, 0), 0);
/// ```
pub fn render_box_filtered(
    width: u32,
    height: u32,
    plane: HalfPlane,
    fg: u8,
    bg: u8,
    subsamples: u32,
) -> OpsResult<Gray8> {
    if subsamples == 0 {
        return Err(OpsError::InvalidParameter("subsamples must be >= 1".into()));
    }
    trace!(width, height, ?plane, subsamples, "box-filtered half-plane");

    let n = subsamples as f64;
    let total = (subsamples * subsamples) as f64;
    Ok(Gray8::from_fn(width, height, |col, row| {
        let i = (height - 1 - row) as f64;
        let j = col as f64;
        let mut covered = 0u32;
        for sy in 0..subsamples {
            let y = i + (sy as f64 + 0.5) / n;
            for sx in 0..subsamples {
                let x = j + (sx as f64 + 0.5) / n;
                if plane.contains(x, y) {
                    covered += 1;
                }
            }
        }
        let frac = covered as f64 / total;
        [(fg as f64 * frac + bg as f64 * (1.0 - frac)) as u8]
    }))
}
