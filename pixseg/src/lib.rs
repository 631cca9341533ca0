//! pixseg - Graph-based color image segmentation
//!
//! Splits an RGB image into regions of similar color by segmenting each
//! channel with an adaptive merge threshold and keeping only the merges
//! all three channels agree on.
//!
//! # Overview
//!
//! - Image I/O for the formats the `image` crate decodes ([`io`])
//! - Gaussian pre-smoothing ([`filter`])
//! - Pixel graphs, channel segmentation, reconciliation, coloring,
//!   ranking, interactive merging and reports ([`region`])
//!
//! # Example
//!
//! ```
//! use pixseg::{Raster, Rgb};
//! use pixseg::region::{SegmentOptions, Session};
//!
//! let raster = Raster::from_fn(6, 6, |x, _| {
//!     if x < 3 { Rgb::new(250, 0, 0) } else { Rgb::new(0, 0, 250) }
//! })
//! .unwrap();
//! let smoothed = pixseg::filter::gaussian_smooth(&raster, 3, 0.8).unwrap();
//! let session = Session::segment(&smoothed, &SegmentOptions::default()).unwrap();
//! assert!(session.region_count() >= 1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixseg_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pixseg_filter as filter;
pub use pixseg_io as io;
pub use pixseg_region as region;
