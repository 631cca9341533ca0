//! Segmentation regression test
//!
//! Known region structure on small synthetic images.
//!
//! Run with:
//! ```
//! cargo test -p pixseg-region --test segment_reg
//! ```
//!
//! Write the region maps for inspection:
//! ```
//! REGTEST_MODE=display cargo test -p pixseg-region --test segment_reg
//! ```

use pixseg_core::Rgb;
use pixseg_region::{ConnectivityType, SegmentOptions, Session};
use pixseg_test::{RegParams, fixtures};

#[test]
fn segment_reg() {
    let mut rp = RegParams::new("segment");

    // -----------------------------------------------------------
    // 2x2 uniform: one region of 4 pixels for any k
    // -----------------------------------------------------------
    let uniform = fixtures::uniform(2, 2, Rgb::new(90, 120, 150));
    for k in [0.0, 1.0, 30000.0] {
        let mut session = Session::segment(&uniform, &SegmentOptions::with_k(k)).unwrap();
        rp.compare_values(1.0, session.region_count() as f64, 0.0);
        rp.compare_values(4.0, session.ranking()[0].1 as f64, 0.0);
    }

    // -----------------------------------------------------------
    // 2x2 diagonal black/white, k = 0
    // -----------------------------------------------------------
    let diagonal = fixtures::diagonal_2x2();
    let mut session = Session::segment(&diagonal, &SegmentOptions::with_k(0.0)).unwrap();
    eprintln!("diagonal regions: {}", session.region_count());
    rp.compare_values(2.0, session.region_count() as f64, 0.0);
    let black = session.region_of(0, 0);
    let white = session.region_of(1, 0);
    rp.check(black == session.region_of(1, 1), "black pixels share a region");
    rp.check(white == session.region_of(0, 1), "white pixels share a region");
    rp.check(black != white, "black and white stay apart");
    rp.write_raster(&session.render().unwrap()).unwrap();

    // Without diagonal edges nothing can merge.
    let four_way = SegmentOptions {
        connectivity: ConnectivityType::FourWay,
        ..SegmentOptions::with_k(0.0)
    };
    let session = Session::segment(&diagonal, &four_way).unwrap();
    rp.compare_values(4.0, session.region_count() as f64, 0.0);

    // -----------------------------------------------------------
    // Vertical stripes of three colors
    // -----------------------------------------------------------
    let colors = [
        Rgb::new(220, 30, 30),
        Rgb::new(30, 220, 30),
        Rgb::new(30, 30, 220),
    ];
    let stripes = fixtures::vertical_stripes(9, 3, 3, &colors);
    let mut session = Session::segment(&stripes, &SegmentOptions::with_k(0.0)).unwrap();
    rp.compare_values(3.0, session.region_count() as f64, 0.0);
    for (_, size) in session.ranking() {
        rp.compare_values(9.0, size as f64, 0.0);
    }
    rp.check(
        session.region_of(0, 0) == session.region_of(2, 2),
        "first stripe is one region",
    );
    rp.write_raster(&session.render().unwrap()).unwrap();

    // A huge k lets everything merge.
    let session = Session::segment(&stripes, &SegmentOptions::with_k(1.0e9)).unwrap();
    rp.compare_values(1.0, session.region_count() as f64, 0.0);

    // -----------------------------------------------------------
    // A single pixel
    // -----------------------------------------------------------
    let single = fixtures::uniform(1, 1, Rgb::WHITE);
    let mut session = Session::segment(&single, &SegmentOptions::default()).unwrap();
    rp.compare_values(1.0, session.region_count() as f64, 0.0);
    rp.check(session.ranking() == vec![(0, 1)], "single pixel ranking");

    assert!(rp.cleanup(), "segment regression test failed");
}
