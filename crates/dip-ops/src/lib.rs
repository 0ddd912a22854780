//! # dip-ops
//!
//! Classical image processing operations on 8-bit gray images.
//!
//! # Modules
//!
//! - [`resample`] - subsampling, nearest-neighbor interpolation, replication
//! - [`tone`] - lookup tables and the power-law transform
//! - [`histogram`] - histograms and histogram equalization
//! - [`filter`] - kernels, correlation and the mean filter
//! - [`order`] - median, min/max, midpoint and nonlinear mean filters
//! - [`sharpen`] - Laplacian response and sharpening
//! - [`spectrum`] - 2D DFT, log-magnitude display, mask frequency responses
//! - [`restore`] - Gaussian blur and regularized inverse filtering
//! - [`color`] - building and filtering RGB bands
//! - [`raster`] - point-sampled and box-filtered half-plane rendering
//! - [`chart`] - rasterized curves, histograms and montages
//!
//! # Example
//!
//! ```rust
//! use dip_core::Gray8;
//! use dip_ops::{histogram, order, BorderMode};
//!
//! let img = Gray8::from_fn(64, 64, |x, y| [((x * y) % 200) as u8]);
//! let (equalized, _lut) = histogram::equalize(&img);
//! let denoised = order::median_filter(&equalized, 3, BorderMode::Reflect).unwrap();
//! assert_eq!(denoised.dimensions(), (64, 64));
//! ```
//!
//! # Parallelism
//!
//! With the default `parallel` feature, neighbourhood filters split their
//! output rows across the rayon thread pool.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod border;
pub mod chart;
pub mod color;
pub mod filter;
pub mod histogram;
pub mod order;
pub mod parallel;
pub mod raster;
pub mod resample;
pub mod restore;
pub mod sharpen;
pub mod spectrum;
pub mod tone;

pub use border::BorderMode;
pub use error::{OpsError, OpsResult};
pub use filter::{Kernel, WindowSize};
pub use order::WindowFilter;
pub use tone::{Lut, Rounding};
