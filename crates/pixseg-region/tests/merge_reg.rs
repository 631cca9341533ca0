//! Interactive merge regression test
//!
//! Run with:
//! ```
//! cargo test -p pixseg-region --test merge_reg
//! ```

use pixseg_core::Rgb;
use pixseg_region::{RegionError, SegmentOptions, Session};
use pixseg_test::{RegParams, fixtures};

#[test]
fn merge_reg() {
    let mut rp = RegParams::new("merge");

    let colors = [
        Rgb::new(200, 30, 30),
        Rgb::new(30, 200, 30),
        Rgb::new(30, 30, 200),
        Rgb::new(220, 220, 40),
    ];
    let scene = fixtures::quadrants(8, 6, colors);
    let mut session = Session::segment(&scene, &SegmentOptions::with_k(0.0)).unwrap();
    rp.compare_values(4.0, session.region_count() as f64, 0.0);
    let top_right = session.region_of(7, 0);
    let bottom_left = session.region_of(0, 5);
    let palette_before = session.render().unwrap();
    rp.write_raster(&palette_before).unwrap();

    // -----------------------------------------------------------
    // Merge top-left with bottom-right, anchored on top-left
    // -----------------------------------------------------------
    let anchor = session.select(1, 1).unwrap();
    session.select(6, 4).unwrap();
    let root = session.merge_selection().unwrap();
    rp.compare_values(anchor as f64, root as f64, 0.0);
    rp.compare_values(3.0, session.region_count() as f64, 0.0);
    rp.check(
        session.region_of(7, 5) == Some(anchor),
        "bottom-right joins the anchor region",
    );
    rp.check(
        session.region_of(7, 0) == top_right && session.region_of(0, 5) == bottom_left,
        "unselected regions keep their roots",
    );
    rp.check(
        session.region_of(7, 0) != session.region_of(0, 5),
        "unselected regions stay apart",
    );

    let ranking = session.ranking();
    rp.compare_values(24.0, ranking[0].1 as f64, 0.0);
    rp.compare_values(anchor as f64, ranking[0].0 as f64, 0.0);

    // The merged region shows in the anchor's color everywhere.
    let after = session.render().unwrap();
    rp.check(
        after.get_pixel(7, 5) == palette_before.get_pixel(0, 0),
        "merged region takes the anchor color",
    );
    rp.check(
        after.get_pixel(7, 0) == palette_before.get_pixel(7, 0),
        "other colors unchanged",
    );
    rp.write_raster(&after).unwrap();

    // Only the merged region's source pixels survive in the region render.
    let region = session.render_region(0, 0).unwrap();
    rp.check(region.get_pixel(7, 5) == Some(colors[3]), "source color kept");
    rp.check(region.get_pixel(7, 0) == Some(Rgb::BLACK), "others blacked out");
    rp.write_raster(&region).unwrap();

    // -----------------------------------------------------------
    // Merging within one region and error paths
    // -----------------------------------------------------------
    let count = session.region_count();
    session.merge_pixels(&[(0, 0), (7, 5)]).unwrap();
    rp.compare_values(count as f64, session.region_count() as f64, 0.0);

    let empty = session.merge_selection();
    rp.check(
        matches!(empty, Err(RegionError::EmptySelection)),
        "empty selection rejected",
    );

    let out_of_bounds = session.merge_pixels(&[(7, 0), (8, 0)]);
    rp.check(
        matches!(
            out_of_bounds,
            Err(RegionError::SelectionOutOfBounds { x: 8, y: 0 })
        ),
        "out-of-bounds selection rejected",
    );
    rp.compare_values(count as f64, session.region_count() as f64, 0.0);

    assert!(rp.cleanup(), "merge regression test failed");
}
