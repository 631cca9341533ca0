//! pixseg-test - Regression test framework for pixseg
//!
//! This crate provides a small regression test harness with two modes:
//!
//! - **Compare**: Check computed values against expected ones (default)
//! - **Display**: Additionally write intermediate rasters to `tests/regout`
//!   for visual inspection
//!
//! Test images are generated synthetically by the [`fixtures`] module, so
//! the regression tests need no binary test data.
//!
//! # Usage
//!
//! ```ignore
//! use pixseg_test::RegParams;
//!
//! let mut rp = RegParams::new("segment");
//! rp.compare_values(4.0, region_count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pixseg-test is at crates/pixseg-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
