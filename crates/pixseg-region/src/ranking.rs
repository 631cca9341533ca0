//! Region ranking and statistics

use crate::disjoint_set::DisjointSet;
use crate::error::RegionResult;
use crate::graph::{PixelId, PixelIdMap};
use pixseg_core::{Raster, Rgb};

/// List every region as `(root, pixel_count)`, largest first.
///
/// Ties are broken by ascending root id, so the order is fully
/// deterministic. The counts sum to the pixel count of `id_map`.
pub fn rank_regions(id_map: &PixelIdMap, set: &mut DisjointSet) -> Vec<(PixelId, u32)> {
    let mut counts = vec![0u32; id_map.len()];
    for id in id_map.ids() {
        counts[set.find(id) as usize] += 1;
    }

    let mut ranked: Vec<(PixelId, u32)> = counts
        .into_iter()
        .enumerate()
        .filter(|&(_, n)| n > 0)
        .map(|(root, n)| (root as PixelId, n))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

/// Axis-aligned bounding box of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionBounds {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Summary of one region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStats {
    /// Representative pixel id
    pub root: PixelId,
    /// Number of pixels
    pub pixel_count: u32,
    /// Bounding box
    pub bounds: RegionBounds,
    /// Mean x coordinate
    pub centroid_x: f64,
    /// Mean y coordinate
    pub centroid_y: f64,
    /// Mean source color, rounded per channel
    pub mean_color: Rgb,
}

#[derive(Default)]
struct Accum {
    count: u64,
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    sum_x: u64,
    sum_y: u64,
    sum_rgb: [u64; 3],
}

impl Accum {
    fn add(&mut self, x: u32, y: u32, color: Rgb) {
        if self.count == 0 {
            (self.min_x, self.min_y, self.max_x, self.max_y) = (x, y, x, y);
        } else {
            self.min_x = self.min_x.min(x);
            self.min_y = self.min_y.min(y);
            self.max_x = self.max_x.max(x);
            self.max_y = self.max_y.max(y);
        }
        self.count += 1;
        self.sum_x += u64::from(x);
        self.sum_y += u64::from(y);
        for (sum, v) in self.sum_rgb.iter_mut().zip(color.to_array()) {
            *sum += u64::from(v);
        }
    }

    fn finish(&self, root: PixelId) -> RegionStats {
        let n = self.count as f64;
        let mean = |sum: u64| (sum as f64 / n).round() as u8;
        RegionStats {
            root,
            pixel_count: self.count as u32,
            bounds: RegionBounds {
                x: self.min_x,
                y: self.min_y,
                w: self.max_x - self.min_x + 1,
                h: self.max_y - self.min_y + 1,
            },
            centroid_x: self.sum_x as f64 / n,
            centroid_y: self.sum_y as f64 / n,
            mean_color: Rgb::new(
                mean(self.sum_rgb[0]),
                mean(self.sum_rgb[1]),
                mean(self.sum_rgb[2]),
            ),
        }
    }
}

/// Compute [`RegionStats`] for every region, in [`rank_regions`] order.
///
/// # Errors
///
/// Returns a dimension mismatch if `raster` does not match `id_map`.
pub fn region_stats(
    raster: &Raster,
    id_map: &PixelIdMap,
    set: &mut DisjointSet,
) -> RegionResult<Vec<RegionStats>> {
    id_map.check_raster(raster)?;

    let mut accums: Vec<Accum> = (0..id_map.len()).map(|_| Accum::default()).collect();
    for (id, &color) in id_map.ids().zip(raster.data()) {
        let (x, y) = id_map.coords(id);
        accums[set.find(id) as usize].add(x, y, color);
    }

    Ok(rank_regions(id_map, set)
        .into_iter()
        .map(|(root, _)| accums[root as usize].finish(root))
        .collect())
}
