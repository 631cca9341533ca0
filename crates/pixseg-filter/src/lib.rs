//! pixseg-filter - Image filtering for pixseg
//!
//! This crate provides the pre-smoothing pass run before segmentation:
//!
//! - **Kernels** - 1D convolution kernels ([`Kernel`])
//! - **Gaussian smoothing** - separable RGB smoothing ([`gaussian_smooth`])
//!
//! # Examples
//!
//! ```
//! use pixseg_core::{Raster, Rgb};
//! use pixseg_filter::gaussian_smooth;
//!
//! let raster = Raster::new_filled(16, 16, Rgb::gray(128)).unwrap();
//! let smoothed = gaussian_smooth(&raster, 5, 1.0).unwrap();
//! assert!(smoothed.sizes_equal(&raster));
//! ```

mod error;
pub mod kernel;
pub mod smooth;

pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, MAX_MASK_SIZE};
pub use smooth::{SmoothOptions, convolve_rgb_sep, gaussian_smooth, gaussian_smooth_with};
