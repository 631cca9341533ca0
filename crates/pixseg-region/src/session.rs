//! Segmentation session
//!
//! A [`Session`] holds everything produced by one segmentation run (the id
//! map, the final region set and the display palette) together with the
//! user's pending pixel selection. It is built only from a successful run,
//! so a caller never observes a half-segmented state.

use crate::coloring::{RegionPalette, color_regions, render_regions};
use crate::disjoint_set::DisjointSet;
use crate::error::{RegionError, RegionResult};
use crate::graph::{PixelId, PixelIdMap, build_graph};
use crate::merge::{merge_selected, render_merged_region};
use crate::ranking::{RegionStats, rank_regions, region_stats};
use crate::reconcile::reconcile;
use crate::report;
use crate::segment::{SegmentOptions, segment_channels};
use pixseg_core::Raster;
use std::io::Write;
use std::path::Path;

/// Result of a segmentation run plus interactive state
#[derive(Debug, Clone)]
pub struct Session {
    source: Raster,
    options: SegmentOptions,
    id_map: PixelIdMap,
    regions: DisjointSet,
    palette: RegionPalette,
    selection: Vec<(u32, u32)>,
}

impl Session {
    /// Segment `raster` and start a session on the result.
    ///
    /// Runs graph construction, the three channel passes and
    /// reconciliation, then colors the regions with
    /// `options.color_seed`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] for a bad merge tolerance
    /// and [`RegionError::InvalidDimensions`] for a raster too large for
    /// 32-bit pixel ids.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixseg_core::{Raster, Rgb};
    /// use pixseg_region::{SegmentOptions, Session};
    ///
    /// let raster = Raster::new_filled(8, 8, Rgb::gray(40)).unwrap();
    /// let session = Session::segment(&raster, &SegmentOptions::default()).unwrap();
    /// assert_eq!(session.region_count(), 1);
    /// ```
    pub fn segment(raster: &Raster, options: &SegmentOptions) -> RegionResult<Self> {
        options.validate()?;

        let mut graph = build_graph(raster, options.connectivity)?;
        segment_channels(
            options.k,
            &graph.edges,
            &mut graph.channel_sets,
            options.parallel,
        )?;
        reconcile(
            &mut graph.region_set,
            &graph.id_map,
            &graph.edges[0],
            &graph.channel_sets,
        );

        let mut regions = graph.region_set;
        let palette = color_regions(&graph.id_map, &mut regions, options.color_seed);
        log::debug!(
            "segmented {}x{} with k={}: {} regions",
            raster.width(),
            raster.height(),
            options.k,
            palette.len()
        );

        Ok(Self {
            source: raster.clone(),
            options: options.clone(),
            id_map: graph.id_map,
            regions,
            palette,
            selection: Vec::new(),
        })
    }

    /// Replace this session with a fresh segmentation.
    ///
    /// On error the current session is left as it was.
    pub fn resegment(&mut self, raster: &Raster, options: &SegmentOptions) -> RegionResult<()> {
        *self = Self::segment(raster, options)?;
        Ok(())
    }

    /// The raster that was segmented.
    pub fn source(&self) -> &Raster {
        &self.source
    }

    /// Options of the run that produced this session.
    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Coordinate ↔ id mapping.
    pub fn id_map(&self) -> &PixelIdMap {
        &self.id_map
    }

    /// Final region set.
    pub fn regions(&self) -> &DisjointSet {
        &self.regions
    }

    /// Display palette.
    pub fn palette(&self) -> &RegionPalette {
        &self.palette
    }

    /// Number of regions.
    pub fn region_count(&self) -> usize {
        self.regions.component_count()
    }

    /// Root of the region containing (x, y), or `None` outside the image.
    pub fn region_of(&mut self, x: u32, y: u32) -> Option<PixelId> {
        let id = self.id_map.id(x, y)?;
        Some(self.regions.find(id))
    }

    /// Add (x, y) to the pending selection and return its region's root.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::SelectionOutOfBounds`] outside the image; the
    /// selection is unchanged in that case.
    pub fn select(&mut self, x: u32, y: u32) -> RegionResult<PixelId> {
        let root = self
            .region_of(x, y)
            .ok_or(RegionError::SelectionOutOfBounds { x, y })?;
        self.selection.push((x, y));
        Ok(root)
    }

    /// Pending selection in the order it was made.
    pub fn selection(&self) -> &[(u32, u32)] {
        &self.selection
    }

    /// Drop the pending selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Merge the regions of the pending selection into the first selected
    /// region, then clear the selection.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::EmptySelection`] if nothing is selected. The
    /// selection is kept on error.
    pub fn merge_selection(&mut self) -> RegionResult<PixelId> {
        let selection = std::mem::take(&mut self.selection);
        match self.merge_pixels(&selection) {
            Ok(root) => Ok(root),
            Err(e) => {
                self.selection = selection;
                Err(e)
            }
        }
    }

    /// Merge the regions under `pixels` without touching the pending
    /// selection.
    pub fn merge_pixels(&mut self, pixels: &[(u32, u32)]) -> RegionResult<PixelId> {
        let before = self.region_count();
        let root = merge_selected(&mut self.regions, &self.id_map, pixels)?;
        let after = self.region_count();
        if after == before {
            log::warn!(
                "merge of {} selected pixels changed nothing; all lie in region {}",
                pixels.len(),
                root
            );
        } else {
            log::debug!("merged {} regions into {}", before - after + 1, root);
        }
        Ok(root)
    }

    /// Regions as `(root, size)`, largest first.
    pub fn ranking(&mut self) -> Vec<(PixelId, u32)> {
        rank_regions(&self.id_map, &mut self.regions)
    }

    /// Per-region statistics against the source raster, largest first.
    pub fn stats(&mut self) -> RegionResult<Vec<RegionStats>> {
        region_stats(&self.source, &self.id_map, &mut self.regions)
    }

    /// Render the region map with the session palette.
    pub fn render(&mut self) -> RegionResult<Raster> {
        render_regions(&self.id_map, &mut self.regions, &mut self.palette)
    }

    /// Render the region containing (x, y) in its source colors on black.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::SelectionOutOfBounds`] outside the image.
    pub fn render_region(&mut self, x: u32, y: u32) -> RegionResult<Raster> {
        let id = self
            .id_map
            .id(x, y)
            .ok_or(RegionError::SelectionOutOfBounds { x, y })?;
        render_merged_region(&self.source, &self.id_map, &mut self.regions, id)
    }

    /// Write the region report to `writer`.
    pub fn write_report<W: Write>(&mut self, writer: W) -> RegionResult<()> {
        report::write_report(&self.ranking(), writer)
    }

    /// Write the region report to a file.
    pub fn save_report<P: AsRef<Path>>(&mut self, path: P) -> RegionResult<()> {
        report::save_report(&self.ranking(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixseg_core::Rgb;

    fn halves() -> Raster {
        Raster::from_fn(4, 2, |x, _| if x < 2 { Rgb::BLACK } else { Rgb::WHITE }).unwrap()
    }

    #[test]
    fn test_segment_halves() {
        let mut session = Session::segment(&halves(), &SegmentOptions::with_k(0.0)).unwrap();
        assert_eq!(session.region_count(), 2);
        assert_eq!(session.region_of(0, 1), session.region_of(1, 0));
        assert_ne!(session.region_of(1, 0), session.region_of(2, 0));
        assert_eq!(session.region_of(4, 0), None);
        assert_eq!(session.ranking().len(), 2);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let result = Session::segment(&halves(), &SegmentOptions::with_k(-1.0));
        assert!(matches!(result, Err(RegionError::InvalidParameters(_))));
    }

    #[test]
    fn test_selection_lifecycle() {
        let mut session = Session::segment(&halves(), &SegmentOptions::with_k(0.0)).unwrap();
        assert!(matches!(
            session.merge_selection(),
            Err(RegionError::EmptySelection)
        ));
        assert!(session.select(9, 9).is_err());
        assert!(session.selection().is_empty());

        let anchor = session.select(3, 1).unwrap();
        session.select(0, 0).unwrap();
        assert_eq!(session.selection(), &[(3, 1), (0, 0)]);

        let root = session.merge_selection().unwrap();
        assert_eq!(root, anchor);
        assert_eq!(session.region_count(), 1);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_clear_selection() {
        let mut session = Session::segment(&halves(), &SegmentOptions::with_k(0.0)).unwrap();
        session.select(0, 0).unwrap();
        session.clear_selection();
        assert!(session.selection().is_empty());
        assert_eq!(session.region_count(), 2);
    }

    #[test]
    fn test_resegment_keeps_state_on_error() {
        let mut session = Session::segment(&halves(), &SegmentOptions::with_k(0.0)).unwrap();
        assert!(
            session
                .resegment(&halves(), &SegmentOptions::with_k(f64::NAN))
                .is_err()
        );
        assert_eq!(session.region_count(), 2);

        session
            .resegment(&halves(), &SegmentOptions::with_k(1.0e6))
            .unwrap();
        assert_eq!(session.options().k, 1.0e6);
    }

    #[test]
    fn test_render_and_report() {
        let mut session = Session::segment(&halves(), &SegmentOptions::with_k(0.0)).unwrap();
        let map = session.render().unwrap();
        assert_eq!(map.get_pixel(0, 0), map.get_pixel(1, 1));
        assert_ne!(map.get_pixel(0, 0), map.get_pixel(3, 0));

        let region = session.render_region(3, 0).unwrap();
        assert_eq!(region.get_pixel(2, 1), Some(Rgb::WHITE));
        assert_eq!(region.get_pixel(0, 0), Some(Rgb::BLACK));

        let mut buf = Vec::new();
        session.write_report(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "2\n4\n4\n");
    }
}
