//! Region coloring
//!
//! Assigns each region a pseudo-random display color and renders the
//! region map. Colors are drawn from a seeded [`StdRng`] in first-encounter
//! order of a row-major scan, so the same partition and seed always give
//! the same image.

use crate::disjoint_set::DisjointSet;
use crate::error::RegionResult;
use crate::graph::{PixelId, PixelIdMap};
use pixseg_core::{Raster, Rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Display colors keyed by region root
///
/// Roots not seen before get a fresh color on lookup. Colors already
/// handed out never change, so a merged region keeps the color of the
/// surviving root.
#[derive(Debug, Clone)]
pub struct RegionPalette {
    rng: StdRng,
    colors: HashMap<PixelId, Rgb>,
}

impl RegionPalette {
    /// Create an empty palette.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            colors: HashMap::new(),
        }
    }

    /// Color of `root`, assigning one if it has none yet.
    pub fn color_of(&mut self, root: PixelId) -> Rgb {
        let rng = &mut self.rng;
        *self
            .colors
            .entry(root)
            .or_insert_with(|| Rgb::new(rng.random(), rng.random(), rng.random()))
    }

    /// Color of `root` if it has been assigned.
    pub fn get(&self, root: PixelId) -> Option<Rgb> {
        self.colors.get(&root).copied()
    }

    /// Number of assigned colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check whether no color has been assigned.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterate over `(root, color)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (PixelId, Rgb)> + '_ {
        self.colors.iter().map(|(&root, &color)| (root, color))
    }
}

/// Assign a color to every region of `set`.
///
/// # Examples
///
/// ```
/// use pixseg_region::{DisjointSet, PixelIdMap, color_regions};
///
/// let map = PixelIdMap::new(2, 2).unwrap();
/// let mut set = DisjointSet::new(4);
/// set.union(0, 1);
/// let palette = color_regions(&map, &mut set, 7);
/// assert_eq!(palette.len(), 3);
/// ```
pub fn color_regions(id_map: &PixelIdMap, set: &mut DisjointSet, seed: u64) -> RegionPalette {
    let mut palette = RegionPalette::new(seed);
    for id in id_map.ids() {
        palette.color_of(set.find(id));
    }
    palette
}

/// Render the region map: every pixel gets its region's color.
///
/// Regions missing from `palette` are colored on the fly.
pub fn render_regions(
    id_map: &PixelIdMap,
    set: &mut DisjointSet,
    palette: &mut RegionPalette,
) -> RegionResult<Raster> {
    let width = id_map.width();
    let raster = Raster::from_fn(width, id_map.height(), |x, y| {
        palette.color_of(set.find(y * width + x))
    })?;
    Ok(raster)
}
