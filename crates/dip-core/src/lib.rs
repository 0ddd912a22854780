//! # dip-core
//!
//! Core types shared by the dip image-processing crates.
//!
//! - [`Image`] - owned row-major image buffer with `N` interleaved channels
//! - [`Sample`] - gray-level sample types (`u8`, `u16`, `f32`, `f64`)
//! - [`Error`] - error type for buffer construction and access
//!
//! Samples are raw gray levels, not normalized values: a `u8` pixel of 200
//! converts to `200.0`. Converting back clamps to the type range and
//! truncates, which is what every exercise expects when it writes an 8-bit
//! result.
//!
//! ## Crate Structure
//!
//! ```text
//! dip-core (this crate)
//!    ^
//!    |
//!    +-- dip-io (raw + PNG files)
//!    +-- dip-ops (filters, transforms, spectra)
//!    +-- dip-cli (exercise runner)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod sample;

pub use error::*;
pub use image::*;
pub use sample::Sample;

/// Number of gray levels in an 8-bit image (`L` in the textbook formulas).
pub const LEVELS: usize = 256;

/// Prelude module for convenient imports.
///
/// ```
/// use dip_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::{Gray, Gray16, Gray8, GrayF, GrayF64, Image, Rgb, Rgb8};
    pub use crate::sample::Sample;
    pub use crate::LEVELS;
}
