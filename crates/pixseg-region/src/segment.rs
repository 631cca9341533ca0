//! Channel segmentation
//!
//! Adaptive-threshold merging over one channel's edge list, in the style
//! of Felzenszwalb–Huttenlocher graph segmentation:
//!
//! 1. Edges are visited in ascending weight order (stable, so equal
//!    weights keep their construction order).
//! 2. For an edge between two different components, each side's threshold
//!    is `internal_diff(root) + k / size(root)`.
//! 3. The edge merges the components when its weight does not exceed the
//!    smaller of the two thresholds. The merged root's internal difference
//!    becomes the edge weight.
//!
//! The `k / size` term shrinks as components grow, so small components
//! accept larger jumps than large ones. Larger `k` gives fewer, larger
//! regions.
//!
//! The three channels share no state and are segmented in parallel.

use crate::disjoint_set::DisjointSet;
use crate::error::{RegionError, RegionResult};
use crate::graph::{ChannelSets, ConnectivityType, Edge};
use pixseg_core::Channel;
use rayon::prelude::*;

/// Default merge tolerance
pub const DEFAULT_MERGE_TOLERANCE: f64 = 30000.0;

/// Options for a segmentation run
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOptions {
    /// Merge tolerance `k` (must be finite and >= 0)
    pub k: f64,
    /// Pixel neighborhood
    pub connectivity: ConnectivityType,
    /// Segment the three channels on separate threads
    pub parallel: bool,
    /// Seed for region display colors
    pub color_seed: u64,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            k: DEFAULT_MERGE_TOLERANCE,
            connectivity: ConnectivityType::EightWay,
            parallel: true,
            color_seed: 0x5EED,
        }
    }
}

impl SegmentOptions {
    /// Options with the given merge tolerance and defaults otherwise.
    pub fn with_k(k: f64) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Check the options before any work is done.
    pub fn validate(&self) -> RegionResult<()> {
        check_merge_tolerance(self.k)
    }
}

fn check_merge_tolerance(k: f64) -> RegionResult<()> {
    if !(k.is_finite() && k >= 0.0) {
        return Err(RegionError::InvalidParameters(format!(
            "merge tolerance k must be finite and non-negative; got {k}"
        )));
    }
    Ok(())
}

/// Return `edges` sorted by ascending weight, keeping the input order among
/// equal weights.
///
/// Weights are bytes, so this is a counting sort in `O(E)`.
pub fn sort_edges_by_weight(edges: &[Edge]) -> Vec<Edge> {
    let mut starts = [0usize; 257];
    for e in edges {
        starts[e.weight as usize + 1] += 1;
    }
    for w in 1..starts.len() {
        starts[w] += starts[w - 1];
    }

    let mut sorted = vec![
        Edge {
            from: 0,
            to: 0,
            weight: 0,
        };
        edges.len()
    ];
    for e in edges {
        let slot = &mut starts[e.weight as usize];
        sorted[*slot] = *e;
        *slot += 1;
    }
    sorted
}

/// Segment one channel into `set` and return the number of merges.
///
/// `set` should start as all singletons. It is flattened afterwards so
/// that read-only [`DisjointSet::root`] queries are cheap.
pub fn segment_channel(k: f64, edges: &[Edge], set: &mut DisjointSet) -> usize {
    let mut merges = 0;
    for edge in sort_edges_by_weight(edges) {
        let root_from = set.find(edge.from);
        let root_to = set.find(edge.to);
        if root_from == root_to {
            continue;
        }

        let threshold_from = set.internal_diff(root_from) + k / f64::from(set.size(root_from));
        let threshold_to = set.internal_diff(root_to) + k / f64::from(set.size(root_to));
        let weight = f64::from(edge.weight);

        if weight <= threshold_from.min(threshold_to) {
            let root = set.union(root_from, root_to);
            set.set_internal_diff(root, weight);
            merges += 1;
            log::trace!(
                "merge {} + {} -> {} at weight {}",
                root_from,
                root_to,
                root,
                edge.weight
            );
        }
    }
    set.flatten();
    merges
}

/// Segment all three channels.
///
/// `edges` and `sets` are indexed by [`Channel::index`]. With `parallel`
/// set, each channel runs on its own rayon task; the call returns once all
/// three have finished. The result is the same either way.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if `k` is negative or not
/// finite, or if an edge list and its store disagree in size. No store is
/// modified in that case.
pub fn segment_channels(
    k: f64,
    edges: &[Vec<Edge>; 3],
    sets: &mut ChannelSets,
    parallel: bool,
) -> RegionResult<()> {
    check_merge_tolerance(k)?;
    let n = sets[0].len();
    if sets.iter().any(|s| s.len() != n) {
        return Err(RegionError::InvalidParameters(
            "channel stores differ in size".into(),
        ));
    }
    if edges.iter().flatten().any(|e| e.from as usize >= n || e.to as usize >= n) {
        return Err(RegionError::InvalidParameters(
            "edge endpoint outside the channel stores".into(),
        ));
    }

    let run = |(i, (set, edges)): (usize, (&mut DisjointSet, &Vec<Edge>))| {
        let merges = segment_channel(k, edges, set);
        log::debug!(
            "{} channel: {} merges, {} components",
            Channel::ALL[i].name(),
            merges,
            set.component_count()
        );
    };

    if parallel {
        sets.as_mut_slice()
            .par_iter_mut()
            .zip(edges.as_slice().par_iter())
            .enumerate()
            .for_each(run);
    } else {
        sets.iter_mut().zip(edges.iter()).enumerate().for_each(run);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use pixseg_core::{Raster, Rgb};

    fn edge(from: u32, to: u32, weight: u8) -> Edge {
        Edge { from, to, weight }
    }

    #[test]
    fn test_sort_is_stable() {
        let edges = vec![edge(0, 1, 5), edge(1, 2, 0), edge(2, 3, 5), edge(3, 4, 0), edge(4, 5, 255)];
        let sorted = sort_edges_by_weight(&edges);
        let order: Vec<u32> = sorted.iter().map(|e| e.from).collect();
        assert_eq!(order, vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_edges_by_weight(&[]).is_empty());
    }

    #[test]
    fn test_merge_sets_internal_diff_to_edge_weight() {
        let mut set = DisjointSet::new(3);
        // Singletons accept any weight up to k.
        let merges = segment_channel(10.0, &[edge(0, 1, 4), edge(1, 2, 10)], &mut set);
        assert_eq!(merges, 1);
        // After the first merge: threshold = 4 + 10/2 = 9 for {0,1}, 10 for {2}.
        assert_eq!(set.size(0), 2);
        assert_eq!(set.internal_diff(0), 4.0);
        assert!(!set.connected(0, 2));
    }

    #[test]
    fn test_internal_diff_tracks_last_accepted_weight() {
        let mut set = DisjointSet::new(4);
        let edges = [edge(0, 1, 3), edge(2, 3, 0), edge(1, 2, 1)];
        segment_channel(100.0, &edges, &mut set);
        assert_eq!(set.component_count(), 1);
        assert_eq!(set.internal_diff(0), 3.0);
    }

    #[test]
    fn test_equal_threshold_merges() {
        let mut set = DisjointSet::new(3);
        // {0,1} threshold = 4 + 10/2 = 9, exactly the edge weight.
        segment_channel(10.0, &[edge(0, 1, 4), edge(1, 2, 9)], &mut set);
        assert_eq!(set.component_count(), 1);
        assert_eq!(set.internal_diff(2), 9.0);
    }

    #[test]
    fn test_zero_k_merges_only_equal_values() {
        let raster = Raster::from_fn(4, 1, |x, _| Rgb::gray(if x < 2 { 10 } else { 11 })).unwrap();
        let mut graph = build_graph(&raster, ConnectivityType::EightWay).unwrap();
        segment_channels(0.0, &graph.edges, &mut graph.channel_sets, false).unwrap();
        for set in &graph.channel_sets {
            assert_eq!(set.component_count(), 2);
            assert!(set.connected(0, 1));
            assert!(set.connected(2, 3));
            assert!(!set.connected(1, 2));
        }
    }

    #[test]
    fn test_channels_are_independent() {
        // Red differs between halves, green and blue do not.
        let raster =
            Raster::from_fn(4, 2, |x, _| Rgb::new(if x < 2 { 0 } else { 200 }, 50, 50)).unwrap();
        let mut graph = build_graph(&raster, ConnectivityType::EightWay).unwrap();
        segment_channels(0.0, &graph.edges, &mut graph.channel_sets, true).unwrap();
        assert_eq!(graph.channel_sets[Channel::Red.index()].component_count(), 2);
        assert_eq!(graph.channel_sets[Channel::Green.index()].component_count(), 1);
        assert_eq!(graph.channel_sets[Channel::Blue.index()].component_count(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let raster = Raster::from_fn(12, 9, |x, y| {
            Rgb::new((x * 37 % 251) as u8, (y * 91 % 241) as u8, ((x + y) * 13) as u8)
        })
        .unwrap();
        let graph = build_graph(&raster, ConnectivityType::EightWay).unwrap();

        let mut seq = graph.channel_sets.clone();
        let mut par = graph.channel_sets.clone();
        segment_channels(300.0, &graph.edges, &mut seq, false).unwrap();
        segment_channels(300.0, &graph.edges, &mut par, true).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_invalid_k_leaves_sets_untouched() {
        let raster = Raster::new(3, 3).unwrap();
        let mut graph = build_graph(&raster, ConnectivityType::EightWay).unwrap();
        let before = graph.channel_sets.clone();
        for k in [-1.0, f64::NAN, f64::INFINITY] {
            let err = segment_channels(k, &graph.edges, &mut graph.channel_sets, true);
            assert!(matches!(err, Err(RegionError::InvalidParameters(_))));
        }
        assert_eq!(graph.channel_sets, before);
    }

    #[test]
    fn test_options() {
        let opts = SegmentOptions::default();
        assert_eq!(opts.k, DEFAULT_MERGE_TOLERANCE);
        assert_eq!(opts.connectivity, ConnectivityType::EightWay);
        assert!(opts.validate().is_ok());
        assert!(SegmentOptions::with_k(0.0).validate().is_ok());
        assert!(SegmentOptions::with_k(-0.5).validate().is_err());
    }
}
