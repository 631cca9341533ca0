//! Convolution kernels
//!
//! Defines the one-dimensional kernel used by separable filtering.
//! A 2D separable filter applies the same kernel once along columns and
//! once along rows.

use crate::{FilterError, FilterResult};

/// Largest accepted Gaussian mask size, in taps.
pub const MAX_MASK_SIZE: u32 = 1023;

/// A 1D convolution kernel with an odd number of taps
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Index of the center tap
    center: usize,
    /// Tap weights, left to right
    data: Vec<f64>,
}

impl Kernel {
    /// Create a kernel from a slice of tap weights.
    ///
    /// The center is the middle tap, so `data` must have odd length.
    pub fn from_slice(data: &[f64]) -> FilterResult<Self> {
        if data.is_empty() || data.len() % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel needs an odd, non-zero number of taps; got {}",
                data.len()
            )));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(FilterError::InvalidKernel(
                "kernel taps must be finite".into(),
            ));
        }
        Ok(Self {
            center: data.len() / 2,
            data: data.to_vec(),
        })
    }

    /// Create a normalized Gaussian kernel.
    ///
    /// Even sizes are bumped to the next odd size, and a size of 0 yields
    /// the single-tap identity kernel. Taps are `exp(-d² / 2σ²)` for the
    /// offset `d` from the center, scaled to sum to 1.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `size` exceeds
    /// [`MAX_MASK_SIZE`], or if `sigma` is not a positive finite number
    /// whose variance is representable.
    pub fn gaussian(size: u32, sigma: f64) -> FilterResult<Self> {
        if size > MAX_MASK_SIZE {
            return Err(FilterError::InvalidParameters(format!(
                "gaussian mask size must be at most {MAX_MASK_SIZE}; got {size}"
            )));
        }
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(FilterError::InvalidParameters(format!(
                "gaussian sigma must be positive; got {sigma}"
            )));
        }
        let denom = 2.0 * sigma * sigma;
        if !(denom.is_finite() && denom > 0.0) {
            return Err(FilterError::InvalidParameters(format!(
                "gaussian sigma {sigma} is out of range"
            )));
        }
        let size = (size | 1) as usize;
        let half = (size / 2) as i64;
        let data: Vec<f64> = (-half..=half)
            .map(|d| (-((d * d) as f64) / denom).exp())
            .collect();

        let mut kernel = Self {
            center: size / 2,
            data,
        };
        kernel.normalize();
        Ok(kernel)
    }

    /// Number of taps.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Index of the center tap.
    #[inline]
    pub fn center(&self) -> usize {
        self.center
    }

    /// Half-width of the kernel (taps on each side of the center).
    #[inline]
    pub fn half_size(&self) -> i64 {
        self.center as i64
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Weight at a signed offset from the center.
    #[inline]
    pub fn at_offset(&self, offset: i64) -> Option<f64> {
        let idx = self.center as i64 + offset;
        if idx < 0 {
            return None;
        }
        self.data.get(idx as usize).copied()
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel whose taps sum to zero is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}
