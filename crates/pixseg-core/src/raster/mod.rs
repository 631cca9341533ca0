//! Raster - The RGB image container
//!
//! The `Raster` structure is the image type consumed by segmentation.
//! It stores one [`Rgb`] sample per pixel in row-major order.
//!
//! # Pixel layout
//!
//! - Samples are stored row by row, top row first
//! - The sample for `(x, y)` lives at index `y * width + x`
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, take a `RasterMut` copy via [`Raster::to_mut`],
//! then convert back with `Into<Raster>`.

mod access;

use crate::Rgb;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal raster data
#[derive(Debug, Clone)]
struct RasterData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row-major samples
    data: Vec<Rgb>,
}

impl RasterData {
    fn filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            data: vec![color; len],
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

/// Raster - RGB image container
///
/// `Raster` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use pixseg_core::{Raster, Rgb};
///
/// let raster = Raster::new_filled(64, 48, Rgb::WHITE).unwrap();
/// assert_eq!(raster.width(), 64);
/// assert_eq!(raster.height(), 48);
/// assert_eq!(raster.get_pixel(3, 3), Some(Rgb::WHITE));
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with every pixel black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, Rgb::BLACK)
    }

    /// Create a new raster with every pixel set to `color`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new_filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        Ok(Raster {
            inner: Arc::new(RasterData::filled(width, height, color)?),
        })
    }

    /// Create a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        let mut inner = RasterData::filled(width, height, Rgb::BLACK)?;
        for y in 0..height {
            for x in 0..width {
                let idx = inner.index(x, y);
                inner.data[idx] = f(x, y);
            }
        }
        Ok(Raster {
            inner: Arc::new(inner),
        })
    }

    /// Create a raster from interleaved `r, g, b` bytes in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::BufferLength`] if `bytes.len() != width * height * 3`.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let mut inner = RasterData::filled(width, height, Rgb::BLACK)?;
        let expected = inner.data.len() * 3;
        if bytes.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }
        for (dst, src) in inner.data.iter_mut().zip(bytes.chunks_exact(3)) {
            *dst = Rgb::new(src[0], src[1], src[2]);
        }
        Ok(Raster {
            inner: Arc::new(inner),
        })
    }

    /// Create a raster from rows of samples (`rows[y][x]`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if there are no rows or the first
    /// row is empty, and [`Error::BufferLength`] if rows differ in length.
    pub fn from_rows(rows: &[Vec<Rgb>]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut inner = RasterData::filled(width, height, Rgb::BLACK)?;
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width as usize {
                return Err(Error::BufferLength {
                    expected: width as usize,
                    actual: row.len(),
                });
            }
            let start = y * width as usize;
            inner.data[start..start + row.len()].copy_from_slice(row);
        }
        Ok(Raster {
            inner: Arc::new(inner),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Total number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.inner.data.len()
    }

    /// Get raw access to the samples.
    #[inline]
    pub fn data(&self) -> &[Rgb] {
        &self.inner.data
    }

    /// Get the samples of one row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[Rgb] {
        let start = self.inner.index(0, y);
        &self.inner.data[start..start + self.inner.width as usize]
    }

    /// Check if two rasters have the same width and height.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Flatten the samples into interleaved `r, g, b` bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.inner.data.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Create a mutable copy of this raster.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable raster
///
/// Allows modification of image data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Create a new black mutable raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(RasterMut {
            inner: RasterData::filled(width, height, Rgb::BLACK)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the samples.
    #[inline]
    pub fn data(&self) -> &[Rgb] {
        &self.inner.data
    }

    /// Get mutable access to the samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Rgb] {
        &mut self.inner.data
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.inner.data.fill(color);
    }
}

impl From<RasterMut> for Raster {
    fn from(raster: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster.inner),
        }
    }
}
