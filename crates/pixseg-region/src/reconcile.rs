//! Region reconciliation
//!
//! Combines the three channel partitions into the final region partition:
//! two adjacent pixels end up in the same region when every channel put
//! them in the same component. Channel stores are only read here, so
//! their roots are queried with [`DisjointSet::root`].

use crate::disjoint_set::DisjointSet;
use crate::graph::{ChannelSets, Edge, PixelIdMap};

/// Union the endpoints of every edge that all three channels agree on.
///
/// Only the `(from, to)` pairs of `edges` are used, so any one channel's
/// edge list will do. Returns the number of unions that joined two
/// previously separate regions.
///
/// The result does not depend on edge order, and running it a second time
/// over the same channel sets changes nothing.
///
/// # Panics
///
/// Panics if `region_set` or any channel store does not cover `id_map`.
pub fn reconcile(
    region_set: &mut DisjointSet,
    id_map: &PixelIdMap,
    edges: &[Edge],
    channel_sets: &ChannelSets,
) -> usize {
    assert_eq!(region_set.len(), id_map.len(), "region set size mismatch");
    assert!(
        channel_sets.iter().all(|s| s.len() == id_map.len()),
        "channel set size mismatch"
    );

    let mut joined = 0;
    for edge in edges {
        let agree = channel_sets
            .iter()
            .all(|set| set.root(edge.from) == set.root(edge.to));
        if agree && region_set.find(edge.from) != region_set.find(edge.to) {
            region_set.union(edge.from, edge.to);
            joined += 1;
        }
    }

    log::debug!(
        "reconciled {} edges: {} unions, {} regions",
        edges.len(),
        joined,
        region_set.component_count()
    );
    joined
}
