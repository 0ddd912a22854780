//! Image buffer type.
//!
//! [`Image<T, N>`] stores `N` interleaved channels of sample type `T` in
//! **row-major** order, top-to-bottom:
//!
//! ```text
//! Memory: [p(0,0) p(1,0) p(2,0) ...]  <- Row 0
//!         [p(0,1) p(1,1) p(2,1) ...]  <- Row 1
//!         ...
//! ```
//!
//! This is the same layout as a headerless raw dump, so a raw file of
//! `width * height` bytes maps directly onto a [`Gray8`].
//!
//! # Usage
//!
//! ```rust
//! use dip_core::{Gray8, Rgb8};
//!
//! let mut img = Gray8::new(640, 480);
//! img.set(10, 20, 255);
//! assert_eq!(img.get(10, 20), 255);
//!
//! let color = Rgb8::filled(4, 4, [255, 128, 51]);
//! assert_eq!(color.pixel(3, 3), [255, 128, 51]);
//! ```

use crate::{Error, Result, Sample};
use std::sync::Arc;

/// Owned image buffer with `N` interleaved channels.
///
/// The pixel buffer is stored in an [`Arc<Vec<T>>`], so cloning is cheap and
/// mutation copies on write.
#[derive(Clone, Debug)]
pub struct Image<T: Sample, const N: usize> {
    data: Arc<Vec<T>>,
    width: u32,
    height: u32,
}

/// Single-channel image.
pub type Gray<T> = Image<T, 1>;
/// 8-bit gray image, the working type of every exercise.
pub type Gray8 = Gray<u8>;
/// 16-bit gray image (wide raw dumps).
pub type Gray16 = Gray<u16>;
/// `f32` gray image, used for signed or unclipped filter responses.
pub type GrayF = Gray<f32>;
/// `f64` gray image, used for frequency-domain results.
pub type GrayF64 = Gray<f64>;
/// Three-band image.
pub type Rgb<T> = Image<T, 3>;
/// 8-bit RGB image.
pub type Rgb8 = Rgb<u8>;

impl<T: Sample, const N: usize> Image<T, N> {
    /// Creates a new image filled with zeros.
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize * N;
        Self {
            data: Arc::new(vec![T::zero(); count]),
            width,
            height,
        }
    }

    /// Creates an image from existing pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height * N`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dip_core::Gray8;
    ///
    /// let img = Gray8::from_data(2, 2, vec![0, 1, 2, 3]).unwrap();
    /// assert_eq!(img.get(1, 1), 3);
    /// assert!(Gray8::from_data(2, 2, vec![0; 3]).is_err());
    /// ```
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = width as usize * height as usize * N;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Creates an image filled with a specific pixel value.
    pub fn filled(width: u32, height: u32, pixel: [T; N]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * N);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Creates an image by evaluating `f(x, y)` for every pixel.
    ///
    /// ```rust
    /// use dip_core::Gray8;
    ///
    /// let ramp = Gray8::from_fn(4, 1, |x, _| [x as u8 * 10]);
    /// assert_eq!(ramp.data(), &[0, 10, 20, 30]);
    /// ```
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [T; N]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * N);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub const fn channels(&self) -> usize {
        N
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns mutable samples, cloning the buffer if it is shared.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Consumes the image and returns its samples.
    pub fn into_vec(self) -> Vec<T> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * N
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [T; N] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.offset(x, y);
        let mut result = [T::zero(); N];
        result.copy_from_slice(&self.data[offset..offset + N]);
        result
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[T; N]> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [T; N]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.offset(x, y);
        let data = Arc::make_mut(&mut self.data);
        data[offset..offset + N].copy_from_slice(&pixel);
    }

    /// Fills the entire image with a pixel value.
    pub fn fill(&mut self, pixel: [T; N]) {
        let data = Arc::make_mut(&mut self.data);
        for chunk in data.chunks_exact_mut(N) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Returns one row of interleaved samples.
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize * N;
        &self.data[start..start + self.width as usize * N]
    }

    /// Returns one mutable row of interleaved samples.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [T] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize * N;
        let end = start + self.width as usize * N;
        &mut self.data_mut()[start..end]
    }

    /// Iterates over all pixels with their coordinates.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, [T; N])> + '_ {
        let width = self.width.max(1);
        self.data.chunks_exact(N).enumerate().map(move |(i, chunk)| {
            let mut px = [T::zero(); N];
            px.copy_from_slice(chunk);
            ((i as u32) % width, (i as u32) / width, px)
        })
    }

    /// Applies `f` to every sample, producing a new image.
    pub fn map<U: Sample>(&self, f: impl Fn(T) -> U) -> Image<U, N> {
        Image {
            data: Arc::new(self.data.iter().map(|&v| f(v)).collect()),
            width: self.width,
            height: self.height,
        }
    }

    /// Converts sample type through `f64` (clamp + truncate for integers).
    pub fn convert<U: Sample>(&self) -> Image<U, N> {
        self.map(|v| U::from_f64(v.to_f64()))
    }

    /// Extracts channel `c` as a single-channel image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] if `c >= N`.
    pub fn channel(&self, c: usize) -> Result<Gray<T>> {
        if c >= N {
            return Err(Error::channel_mismatch(N, c));
        }
        Ok(Image {
            data: Arc::new(self.data.iter().skip(c).step_by(N).copied().collect()),
            width: self.width,
            height: self.height,
        })
    }

    /// Interleaves `N` single-channel images into one image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the planes differ in size.
    pub fn from_channels(planes: &[Gray<T>; N]) -> Result<Self> {
        let (width, height) = planes[0].dimensions();
        for plane in planes.iter().skip(1) {
            if plane.dimensions() != (width, height) {
                return Err(Error::dimension_mismatch((width, height), plane.dimensions()));
            }
        }
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * N);
        for i in 0..count {
            for plane in planes {
                data.push(plane.data[i]);
            }
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }
}

impl<T: Sample> Gray<T> {
    /// Returns the sample at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> T {
        self.pixel(x, y)[0]
    }

    /// Sets the sample at (x, y).
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: T) {
        self.set_pixel(x, y, [value]);
    }

    /// Returns the smallest and largest sample, ignoring NaN.
    ///
    /// Returns `None` for an empty image.
    pub fn min_max(&self) -> Option<(T, T)> {
        let mut iter = self.data.iter().copied().filter(|v| v.partial_cmp(v).is_some());
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| {
            (if v < lo { v } else { lo }, if v > hi { v } else { hi })
        }))
    }
}

impl<T: Sample + PartialEq, const N: usize> PartialEq for Image<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.data == other.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let img = Gray8::new(640, 480);
        assert_eq!(img.pixel_count(), 640 * 480);
        assert!(img.data().iter().all(|&v| v == 0));
        assert!(!img.is_empty());
        assert!(Gray8::new(0, 10).is_empty());
    }

    #[test]
    fn test_row_major_layout() {
        let img = Gray8::from_data(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.get(2, 0), 3);
        assert_eq!(img.get(0, 1), 4);
        assert_eq!(img.row(1), &[4, 5, 6]);
    }

    #[test]
    fn test_copy_on_write() {
        let a = Gray8::filled(2, 2, [7]);
        let mut b = a.clone();
        b.set(0, 0, 9);
        assert_eq!(a.get(0, 0), 7);
        assert_eq!(b.get(0, 0), 9);
    }

    #[test]
    fn test_channels_roundtrip() {
        let rgb = Rgb8::from_fn(3, 2, |x, y| [x as u8, y as u8, 100]);
        let g = rgb.channel(1).unwrap();
        assert_eq!(g.get(2, 1), 1);
        assert!(rgb.channel(3).is_err());

        let planes = [rgb.channel(0).unwrap(), g, rgb.channel(2).unwrap()];
        let merged = Rgb8::from_channels(&planes).unwrap();
        assert_eq!(merged, rgb);
    }

    #[test]
    fn test_from_channels_size_mismatch() {
        let planes = [Gray8::new(2, 2), Gray8::new(2, 2), Gray8::new(3, 2)];
        assert!(Rgb8::from_channels(&planes).is_err());
    }

    #[test]
    fn test_convert_truncates() {
        let f = GrayF::from_data(3, 1, vec![-2.0, 12.7, 400.0]).unwrap();
        let g: Gray8 = f.convert();
        assert_eq!(g.data(), &[0, 12, 255]);
    }

    #[test]
    fn test_min_max() {
        let f = GrayF::from_data(4, 1, vec![3.0, f32::NAN, -1.0, 8.0]).unwrap();
        assert_eq!(f.min_max(), Some((-1.0, 8.0)));
        assert_eq!(GrayF::new(0, 0).min_max(), None);
    }

    #[test]
    fn test_pixels_iterator() {
        let img = Gray8::from_fn(2, 2, |x, y| [(x + 2 * y) as u8]);
        let coords: Vec<_> = img.pixels().map(|(x, y, p)| (x, y, p[0])).collect();
        assert_eq!(coords, vec![(0, 0, 0), (1, 0, 1), (0, 1, 2), (1, 1, 3)]);
    }
}
