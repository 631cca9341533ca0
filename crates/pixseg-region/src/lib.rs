//! pixseg-region - Graph-based region segmentation
//!
//! This crate splits an RGB raster into regions of similar color:
//!
//! - **Pixel graph** - One node per pixel, one weighted edge per neighbor
//!   pair and channel ([`build_graph`])
//! - **Channel segmentation** - Adaptive-threshold merging, one independent
//!   pass per color channel ([`segment_channels`])
//! - **Reconciliation** - Pixels form a region only where all three
//!   channels agree ([`reconcile`])
//! - **Post-processing** - Region coloring, ranking, statistics,
//!   interactive merging and the text report
//!
//! [`Session`] runs the whole pipeline and keeps the interactive state.
//!
//! # Examples
//!
//! ## Segmenting an image
//!
//! ```
//! use pixseg_core::{Raster, Rgb};
//! use pixseg_region::{SegmentOptions, Session};
//!
//! // Left half black, right half white
//! let raster = Raster::from_fn(8, 4, |x, _| {
//!     if x < 4 { Rgb::BLACK } else { Rgb::WHITE }
//! })
//! .unwrap();
//!
//! let mut session = Session::segment(&raster, &SegmentOptions::with_k(0.0)).unwrap();
//! assert_eq!(session.region_count(), 2);
//! assert_eq!(session.ranking(), vec![(0, 16), (4, 16)]);
//! ```
//!
//! ## Merging regions by hand
//!
//! ```
//! use pixseg_core::{Raster, Rgb};
//! use pixseg_region::{SegmentOptions, Session};
//!
//! let raster = Raster::from_fn(8, 4, |x, _| {
//!     if x < 4 { Rgb::BLACK } else { Rgb::WHITE }
//! })
//! .unwrap();
//! let mut session = Session::segment(&raster, &SegmentOptions::with_k(0.0)).unwrap();
//!
//! session.select(7, 3).unwrap();
//! session.select(0, 0).unwrap();
//! session.merge_selection().unwrap();
//! assert_eq!(session.region_count(), 1);
//! ```

pub mod coloring;
pub mod disjoint_set;
mod error;
pub mod graph;
pub mod merge;
pub mod ranking;
pub mod reconcile;
pub mod report;
pub mod segment;
pub mod session;

pub use error::{RegionError, RegionResult};

pub use coloring::{RegionPalette, color_regions, render_regions};
pub use disjoint_set::DisjointSet;
pub use graph::{ChannelSets, ConnectivityType, Edge, PixelGraph, PixelId, PixelIdMap, build_graph};
pub use merge::{merge_selected, region_coords, render_merged_region};
pub use ranking::{RegionBounds, RegionStats, rank_regions, region_stats};
pub use reconcile::reconcile;
pub use report::{format_report, save_report, write_report};
pub use segment::{
    DEFAULT_MERGE_TOLERANCE, SegmentOptions, segment_channel, segment_channels,
    sort_edges_by_weight,
};
pub use session::Session;
