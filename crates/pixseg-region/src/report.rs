//! Plain-text region report
//!
//! ```text
//! <region count>
//! <size of largest region>
//! <size of next region>
//! ...
//! ```
//!
//! Sizes are written in [`rank_regions`](crate::rank_regions) order, one
//! per line, each line terminated by `\n`.

use crate::error::RegionResult;
use crate::graph::PixelId;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Format a ranking as report text.
pub fn format_report(ranked: &[(PixelId, u32)]) -> String {
    let mut out = format!("{}\n", ranked.len());
    for &(_, size) in ranked {
        out.push_str(&size.to_string());
        out.push('\n');
    }
    out
}

/// Write the report for `ranked` to `writer`.
pub fn write_report<W: Write>(ranked: &[(PixelId, u32)], mut writer: W) -> RegionResult<()> {
    writer.write_all(format_report(ranked).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write the report for `ranked` to a file, replacing it if it exists.
pub fn save_report<P: AsRef<Path>>(ranked: &[(PixelId, u32)], path: P) -> RegionResult<()> {
    let file = File::create(path.as_ref())?;
    write_report(ranked, BufWriter::new(file))?;
    log::debug!(
        "wrote report for {} regions to {}",
        ranked.len(),
        path.as_ref().display()
    );
    Ok(())
}
