//! Interactive region merging
//!
//! The user picks pixels; every region containing a picked pixel is folded
//! into the region of the first pick. The anchor region keeps its root, so
//! its display color is stable across merges.

use crate::disjoint_set::DisjointSet;
use crate::error::{RegionError, RegionResult};
use crate::graph::{PixelId, PixelIdMap};
use pixseg_core::{Raster, Rgb};

/// Merge the regions under `selection` into one and return its root.
///
/// The first selected pixel's region is the anchor: every other selected
/// region is unioned with it. All coordinates are checked before the
/// first union, so an error leaves `set` untouched. Selecting the same
/// region more than once is harmless.
///
/// # Errors
///
/// - [`RegionError::EmptySelection`] if `selection` is empty
/// - [`RegionError::SelectionOutOfBounds`] for the first coordinate outside
///   `id_map`
///
/// # Examples
///
/// ```
/// use pixseg_region::{DisjointSet, PixelIdMap, merge_selected};
///
/// let map = PixelIdMap::new(4, 1).unwrap();
/// let mut set = DisjointSet::new(4);
/// let root = merge_selected(&mut set, &map, &[(3, 0), (0, 0)]).unwrap();
/// assert_eq!(root, 3);
/// assert!(set.connected(0, 3));
/// assert!(!set.connected(1, 3));
/// ```
pub fn merge_selected(
    set: &mut DisjointSet,
    id_map: &PixelIdMap,
    selection: &[(u32, u32)],
) -> RegionResult<PixelId> {
    let ids = selection
        .iter()
        .map(|&(x, y)| {
            id_map
                .id(x, y)
                .ok_or(RegionError::SelectionOutOfBounds { x, y })
        })
        .collect::<RegionResult<Vec<PixelId>>>()?;
    let (&anchor, rest) = ids.split_first().ok_or(RegionError::EmptySelection)?;

    let root = set.find(anchor);
    for &id in rest {
        set.union_into(root, id);
    }
    Ok(root)
}

/// Coordinates of every pixel in the region containing `id`, in scan order.
pub fn region_coords(id_map: &PixelIdMap, set: &mut DisjointSet, id: PixelId) -> Vec<(u32, u32)> {
    set.members(id)
        .into_iter()
        .map(|member| id_map.coords(member))
        .collect()
}

/// Render one region on black: pixels of the region containing `id` keep
/// their color from `source`, every other pixel is black.
///
/// # Errors
///
/// Returns a dimension mismatch if `source` does not match `id_map`.
pub fn render_merged_region(
    source: &Raster,
    id_map: &PixelIdMap,
    set: &mut DisjointSet,
    id: PixelId,
) -> RegionResult<Raster> {
    id_map.check_raster(source)?;
    let root = set.find(id);
    let width = id_map.width();
    let raster = Raster::from_fn(width, id_map.height(), |x, y| {
        if set.find(y * width + x) == root {
            source.get_pixel_unchecked(x, y)
        } else {
            Rgb::BLACK
        }
    })?;
    Ok(raster)
}
