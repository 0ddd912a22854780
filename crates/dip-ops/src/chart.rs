//! Rasterized charts and figure layout.
//!
//! Transfer curves, histograms and side-by-side comparisons are written as
//! plain 8-bit images: black ink on a white background.
//!
//! # Example
//!
//! ```rust
//! use dip_ops::chart::plot_curves;
//! use dip_ops::tone::{Lut, Rounding};
//!
//! let low = Lut::power_law(0.4, Rounding::Truncate).unwrap().to_curve();
//! let high = Lut::power_law(2.5, Rounding::Truncate).unwrap().to_curve();
//! let chart = plot_curves(&[&low, &high], 320, 320).unwrap();
//! assert_eq!(chart.dimensions(), (320, 320));
//! ```

use crate::histogram::Histogram;
use crate::{OpsError, OpsResult};
use dip_core::Gray8;
use tracing::trace;

/// Background level.
pub const PAPER: u8 = 255;
/// Axis and first-curve level.
pub const INK: u8 = 0;

const MARGIN: i32 = 8;
const CURVE_INKS: [u8; 4] = [INK, 110, 170, 60];

/// Gray drawing surface. Drawing outside the bounds is clipped.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: Gray8,
}

impl Canvas {
    /// Blank canvas filled with [`PAPER`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: Gray8::filled(width, height, [PAPER]),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Sets one pixel if it is inside the canvas.
    #[inline]
    pub fn point(&mut self, x: i32, y: i32, value: u8) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.image.set(x as u32, y as u32, value);
        }
    }

    /// Bresenham line from (x1, y1) to (x2, y2), both ends included.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, value: u8) {
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.point(x, y, value);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Rectangle outline with corners (x1, y1) and (x2, y2).
    pub fn rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, value: u8) {
        self.line(x1, y1, x2, y1, value);
        self.line(x2, y1, x2, y2, value);
        self.line(x2, y2, x1, y2, value);
        self.line(x1, y2, x1, y1, value);
    }

    /// Filled rectangle with corners (x1, y1) and (x2, y2).
    pub fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, value: u8) {
        for y in y1.min(y2)..=y1.max(y2) {
            for x in x1.min(x2)..=x1.max(x2) {
                self.point(x, y, value);
            }
        }
    }

    /// Copies `src` with its top-left corner at (x, y).
    pub fn blit(&mut self, src: &Gray8, x: i32, y: i32) {
        for (sx, sy, [v]) in src.pixels() {
            self.point(x + sx as i32, y + sy as i32, v);
        }
    }

    /// Finishes drawing.
    pub fn into_image(self) -> Gray8 {
        self.image
    }
}

/// Plot frame: inner area in pixel coordinates.
struct Frame {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl Frame {
    fn new(width: u32, height: u32) -> OpsResult<Self> {
        let min = (2 * MARGIN + 2) as u32;
        if width < min || height < min {
            return Err(OpsError::InvalidDimensions(format!(
                "chart {}x{} smaller than {}x{}",
                width, height, min, min
            )));
        }
        Ok(Self {
            left: MARGIN,
            top: MARGIN,
            right: width as i32 - 1 - MARGIN,
            bottom: height as i32 - 1 - MARGIN,
        })
    }

    fn inner_width(&self) -> i32 {
        self.right - self.left
    }

    fn inner_height(&self) -> i32 {
        self.bottom - self.top
    }

    fn y_for(&self, value: f32, max: f32) -> i32 {
        let t = (value / max).clamp(0.0, 1.0);
        self.bottom - (t * self.inner_height() as f32).round() as i32
    }
}

/// Line chart of one or more curves over their sample index.
///
/// The y axis runs from 0 to the largest value of any curve.
pub fn plot_curves(curves: &[&[f32]], width: u32, height: u32) -> OpsResult<Gray8> {
    if curves.is_empty() || curves.iter().any(|c| c.is_empty()) {
        return Err(OpsError::InvalidParameter("nothing to plot".into()));
    }
    let frame = Frame::new(width, height)?;
    trace!(curves = curves.len(), width, height, "plot curves");

    let max = curves
        .iter()
        .flat_map(|c| c.iter().copied())
        .fold(0.0f32, f32::max);
    let max = if max > 0.0 { max } else { 1.0 };

    let mut canvas = Canvas::new(width, height);
    canvas.rect(frame.left, frame.top, frame.right, frame.bottom, INK);

    for (n, curve) in curves.iter().enumerate() {
        let ink = CURVE_INKS[n % CURVE_INKS.len()];
        let span = (curve.len() - 1).max(1) as f32;
        let mut prev: Option<(i32, i32)> = None;
        for (i, &v) in curve.iter().enumerate() {
            let x = frame.left + (i as f32 / span * frame.inner_width() as f32).round() as i32;
            let y = frame.y_for(v, max);
            match prev {
                Some((px, py)) => canvas.line(px, py, x, y, ink),
                None => canvas.point(x, y, ink),
            }
            prev = Some((x, y));
        }
    }

    Ok(canvas.into_image())
}

/// Bar chart with one bar per gray level.
pub fn plot_histogram(hist: &Histogram, width: u32, height: u32) -> OpsResult<Gray8> {
    let frame = Frame::new(width, height)?;
    trace!(width, height, total = hist.total(), "plot histogram");

    let max = hist.max_count().max(1) as f32;
    let bins = hist.bins();
    let inner = frame.inner_width() + 1;

    let mut canvas = Canvas::new(width, height);
    for (level, &count) in bins.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let x1 = frame.left + level as i32 * inner / bins.len() as i32;
        let x2 = (frame.left + (level as i32 + 1) * inner / bins.len() as i32 - 1).max(x1);
        let y = frame.y_for(count as f32, max);
        canvas.fill_rect(x1, y, x2, frame.bottom, INK);
    }
    canvas.rect(frame.left, frame.top, frame.right, frame.bottom, INK);

    Ok(canvas.into_image())
}

/// Lays images out on a grid, left to right then top to bottom.
///
/// Every cell is as large as the largest image; `gap` pixels of paper
/// separate cells and surround the grid.
pub fn montage(images: &[&Gray8], columns: usize, gap: u32) -> OpsResult<Gray8> {
    if images.is_empty() {
        return Err(OpsError::InvalidParameter("montage needs at least one image".into()));
    }
    if columns == 0 {
        return Err(OpsError::InvalidParameter("montage needs at least one column".into()));
    }
    let cols = columns.min(images.len()) as u32;
    let rows = images.len().div_ceil(columns) as u32;
    let cell_w = images.iter().map(|i| i.width()).max().unwrap_or(0);
    let cell_h = images.iter().map(|i| i.height()).max().unwrap_or(0);
    let width = cols * cell_w + (cols + 1) * gap;
    let height = rows * cell_h + (rows + 1) * gap;
    trace!(count = images.len(), cols, rows, width, height, "montage");

    let mut canvas = Canvas::new(width, height);
    for (n, img) in images.iter().enumerate() {
        let (c, r) = ((n % columns) as u32, (n / columns) as u32);
        let x = gap + c * (cell_w + gap);
        let y = gap + r * (cell_h + gap);
        canvas.blit(img, x as i32, y as i32);
    }
    Ok(canvas.into_image())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endpoints_and_clipping() {
        let mut c = Canvas::new(10, 10);
        c.line(0, 0, 9, 4, INK);
        c.line(-5, -5, 20, 20, 100);
        let img = c.into_image();
        assert_eq!(img.get(9, 4), INK);
        assert_eq!(img.get(0, 0), 100);
        assert_eq!(img.get(9, 9), 100);
        assert_eq!(img.get(0, 9), PAPER);
    }

    #[test]
    fn test_fill_rect() {
        let mut c = Canvas::new(6, 6);
        c.fill_rect(4, 4, 1, 2, 7);
        let img = c.into_image();
        assert_eq!(img.get(1, 2), 7);
        assert_eq!(img.get(4, 4), 7);
        assert_eq!(img.get(5, 5), PAPER);
        assert_eq!(img.get(0, 2), PAPER);
    }

    #[test]
    fn test_identity_curve_is_diagonal() {
        let curve: Vec<f32> = (0..256).map(|v| v as f32).collect();
        let img = plot_curves(&[&curve], 272, 272).unwrap();
        // Inner area is 255 x 255, so the diagonal hits (8, 263) and (263, 8).
        assert_eq!(img.get(8, 263), INK);
        assert_eq!(img.get(263, 8), INK);
        assert_eq!(img.get(135, 136), INK);
        assert_eq!(img.get(40, 40), PAPER);
    }

    #[test]
    fn test_plot_rejects_bad_input() {
        assert!(plot_curves(&[], 100, 100).is_err());
        assert!(plot_curves(&[&[1.0]], 10, 100).is_err());
    }

    #[test]
    fn test_histogram_bars() {
        let img = Gray8::from_data(4, 1, vec![0, 0, 255, 128]).unwrap();
        let hist = Histogram::from_image(&img);
        let chart = plot_histogram(&hist, 256 + 16, 116).unwrap();
        // Tallest bar (level 0) reaches the top of the frame.
        assert_eq!(chart.get(8, 8), INK);
        // Half-height bar at level 128.
        assert_eq!(chart.get(136, 60), INK);
        assert_eq!(chart.get(136, 50), PAPER);
        assert_eq!(chart.get(100, 60), PAPER);
    }

    #[test]
    fn test_montage_layout() {
        let a = Gray8::filled(4, 3, [10]);
        let b = Gray8::filled(2, 5, [20]);
        let c = Gray8::filled(4, 4, [30]);
        let m = montage(&[&a, &b, &c], 2, 1).unwrap();
        assert_eq!(m.dimensions(), (2 * 4 + 3, 2 * 5 + 3));
        assert_eq!(m.get(1, 1), 10);
        assert_eq!(m.get(6, 5), 20);
        assert_eq!(m.get(1, 7), 30);
        assert_eq!(m.get(0, 0), PAPER);
        assert!(montage(&[], 2, 1).is_err());
        assert!(montage(&[&a], 0, 1).is_err());
    }
}
