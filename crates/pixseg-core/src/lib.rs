//! pixseg core - Basic data structures for image segmentation
//!
//! This crate provides the fundamental data structures used throughout
//! the pixseg workspace:
//!
//! - [`Raster`] / [`RasterMut`] - The RGB image container (immutable / mutable)
//! - [`Rgb`] - A single 8-bit-per-channel color sample
//! - [`Channel`] - Color channel selector used by per-channel processing

pub mod error;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{Raster, RasterMut};

/// Color channel of an RGB sample.
///
/// Segmentation runs one independent pass per channel, so most per-channel
/// data in the workspace is stored in `[T; 3]` arrays indexed by
/// [`Channel::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red channel
    Red,
    /// Green channel
    Green,
    /// Blue channel
    Blue,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of this channel in `[T; 3]` storage.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// Lowercase channel name, used in log output.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

/// An RGB color sample with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Black (0, 0, 0)
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray color with all channels set to `v`.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Value of a single channel.
    #[inline]
    pub fn channel(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Absolute difference between `self` and `other` in one channel.
    #[inline]
    pub fn channel_diff(self, other: Rgb, channel: Channel) -> u8 {
        self.channel(channel).abs_diff(other.channel(channel))
    }

    /// Components as an `[r, g, b]` array.
    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(v: [u8; 3]) -> Self {
        Rgb::new(v[0], v[1], v[2])
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}
