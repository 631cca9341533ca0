//! Pixel access functions
//!
//! Functions for getting and setting individual pixels. The checked
//! variants return `None` / an error for out-of-range coordinates; the
//! `_unchecked` variants panic instead.

use super::{Raster, RasterMut};
use crate::Rgb;
use crate::error::{Error, Result};

impl Raster {
    /// Get the sample at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[self.inner.index(x, y)])
    }

    /// Get the sample at (x, y) without bounds checking against width.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> Rgb {
        self.inner.data[self.inner.index(x, y)]
    }
}

impl RasterMut {
    /// Get the sample at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[self.inner.index(x, y)])
    }

    /// Set the sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) -> Result<()> {
        if x >= self.inner.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.inner.width as usize,
            });
        }
        if y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.inner.height as usize,
            });
        }
        let idx = self.inner.index(x, y);
        self.inner.data[idx] = color;
        Ok(())
    }

    /// Set the sample at (x, y) without bounds checking against width.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, color: Rgb) {
        let idx = self.inner.index(x, y);
        self.inner.data[idx] = color;
    }
}
