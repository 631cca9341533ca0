//! Pixel graph construction
//!
//! Turns an RGB raster into a grid graph: one node per pixel, identified by
//! a dense [`PixelId`], and one undirected edge per adjacent pixel pair.
//! Every edge exists once per color channel, weighted by the absolute
//! difference of that channel between the two endpoints.
//!
//! Ids are assigned in row-major order (`id = y * width + x`). Edges are
//! generated only towards "forward" neighbors so that each unordered pair
//! appears exactly once.

use crate::disjoint_set::DisjointSet;
use crate::error::{RegionError, RegionResult};
use pixseg_core::{Channel, Raster};

/// Dense pixel identifier, used as the index into every disjoint-set array.
pub type PixelId = u32;

/// The three per-channel disjoint-set stores, indexed by [`Channel::index`].
pub type ChannelSets = [DisjointSet; 3];

/// Neighborhood used when building the pixel graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    /// Forward neighbor offsets `(dx, dy)`.
    ///
    /// For 8-way: right, down-right, down, down-left.
    /// For 4-way: right, down.
    pub fn forward_offsets(self) -> &'static [(i64, i64)] {
        match self {
            ConnectivityType::FourWay => &[(1, 0), (0, 1)],
            ConnectivityType::EightWay => &[(1, 0), (1, 1), (0, 1), (-1, 1)],
        }
    }

    /// Number of undirected edges in a `width` × `height` grid.
    pub fn edge_count(self, width: u32, height: u32) -> usize {
        let (w, h) = (width as usize, height as usize);
        let straight = w.saturating_sub(1) * h + w * h.saturating_sub(1);
        match self {
            ConnectivityType::FourWay => straight,
            ConnectivityType::EightWay => {
                straight + 2 * w.saturating_sub(1) * h.saturating_sub(1)
            }
        }
    }
}

/// Mapping between pixel coordinates and dense [`PixelId`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelIdMap {
    width: u32,
    height: u32,
}

impl PixelIdMap {
    /// Create the id map for a `width` × `height` grid.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidDimensions`] if either dimension is 0
    /// or the pixel count does not fit in a [`PixelId`].
    pub fn new(width: u32, height: u32) -> RegionResult<Self> {
        let count = u64::from(width) * u64::from(height);
        if width == 0 || height == 0 || count > u64::from(PixelId::MAX) {
            return Err(RegionError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Grid width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Always false; an id map covers at least one pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Id of the pixel at (x, y), or `None` outside the grid.
    #[inline]
    pub fn id(&self, x: u32, y: u32) -> Option<PixelId> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Coordinates of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is outside the grid.
    #[inline]
    pub fn coords(&self, id: PixelId) -> (u32, u32) {
        assert!((id as usize) < self.len(), "pixel id {id} out of range");
        (id % self.width, id / self.width)
    }

    /// All ids in scan order.
    pub fn ids(&self) -> std::ops::Range<PixelId> {
        0..self.len() as PixelId
    }

    /// Check that `raster` has this map's dimensions.
    pub fn check_raster(&self, raster: &Raster) -> RegionResult<()> {
        if raster.width() != self.width || raster.height() != self.height {
            return Err(pixseg_core::Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (raster.width(), raster.height()),
            }
            .into());
        }
        Ok(())
    }
}

/// An undirected edge with a single-channel weight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Endpoint visited first in scan order
    pub from: PixelId,
    /// Forward neighbor of `from`
    pub to: PixelId,
    /// Absolute channel difference between the endpoints
    pub weight: u8,
}

/// Output of [`build_graph`]
///
/// The three edge lists hold identical `(from, to)` pairs in identical
/// order and differ only in weight.
#[derive(Debug, Clone)]
pub struct PixelGraph {
    /// Coordinate ↔ id mapping
    pub id_map: PixelIdMap,
    /// Per-channel edge lists, indexed by [`Channel::index`]
    pub edges: [Vec<Edge>; 3],
    /// Empty region store, filled by reconciliation
    pub region_set: DisjointSet,
    /// Empty per-channel stores, filled by channel segmentation
    pub channel_sets: ChannelSets,
}

impl PixelGraph {
    /// Edge list for one channel.
    pub fn edges(&self, channel: Channel) -> &[Edge] {
        &self.edges[channel.index()]
    }

    /// Number of undirected edges (per channel).
    pub fn edge_count(&self) -> usize {
        self.edges[0].len()
    }
}

/// Build the pixel graph of an RGB raster.
///
/// # Errors
///
/// Returns [`RegionError::InvalidDimensions`] if the raster is too large
/// for dense 32-bit ids.
///
/// # Examples
///
/// ```
/// use pixseg_core::{Raster, Rgb};
/// use pixseg_region::{ConnectivityType, build_graph};
///
/// let raster = Raster::new_filled(3, 2, Rgb::WHITE).unwrap();
/// let graph = build_graph(&raster, ConnectivityType::EightWay).unwrap();
/// assert_eq!(graph.edge_count(), 11);
/// assert_eq!(graph.region_set.len(), 6);
/// ```
pub fn build_graph(raster: &Raster, connectivity: ConnectivityType) -> RegionResult<PixelGraph> {
    let id_map = PixelIdMap::new(raster.width(), raster.height())?;
    let (w, h) = (raster.width() as i64, raster.height() as i64);
    let pixels = raster.data();

    let capacity = connectivity.edge_count(raster.width(), raster.height());
    let mut edges: [Vec<Edge>; 3] = std::array::from_fn(|_| Vec::with_capacity(capacity));

    for y in 0..h {
        for x in 0..w {
            let from = (y * w + x) as PixelId;
            let a = pixels[from as usize];
            for &(dx, dy) in connectivity.forward_offsets() {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || nx >= w || ny >= h {
                    continue;
                }
                let to = (ny * w + nx) as PixelId;
                let b = pixels[to as usize];
                for channel in Channel::ALL {
                    edges[channel.index()].push(Edge {
                        from,
                        to,
                        weight: a.channel_diff(b, channel),
                    });
                }
            }
        }
    }

    let n = id_map.len();
    log::debug!(
        "built pixel graph {}x{}: {} nodes, {} edges per channel ({:?})",
        raster.width(),
        raster.height(),
        n,
        edges[0].len(),
        connectivity
    );

    Ok(PixelGraph {
        id_map,
        edges,
        region_set: DisjointSet::new(n),
        channel_sets: std::array::from_fn(|_| DisjointSet::new(n)),
    })
}
