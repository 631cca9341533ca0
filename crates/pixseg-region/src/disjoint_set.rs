//! Disjoint-set (union-find) store
//!
//! Index-addressed union-find over dense pixel ids. Three parallel arrays
//! are kept per store:
//!
//! - `parent` - union-find parent; a root is its own parent
//! - `size` - component size, valid at roots only
//! - `internal_diff` - adaptive threshold baseline, valid at roots only
//!
//! `find` compresses paths iteratively; `union` attaches the smaller
//! component under the larger one. Passing an id outside `[0, len)` to
//! any operation is a programming error and panics.

use crate::graph::PixelId;

/// Union-find store with per-root size and internal difference
#[derive(Debug, Clone, PartialEq)]
pub struct DisjointSet {
    parent: Vec<PixelId>,
    size: Vec<u32>,
    internal_diff: Vec<f64>,
}

impl DisjointSet {
    /// Create `n` singleton sets (`size = 1`, `internal_diff = 0`).
    ///
    /// # Panics
    ///
    /// Panics if `n` does not fit in a [`PixelId`].
    pub fn new(n: usize) -> Self {
        assert!(
            n <= PixelId::MAX as usize,
            "disjoint set too large: {n} elements"
        );
        Self {
            parent: (0..n as PixelId).collect(),
            size: vec![1; n],
            internal_diff: vec![0.0; n],
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Check whether the store has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Find the root of `id`, compressing the path to it.
    ///
    /// # Panics
    ///
    /// Panics if `id >= len()`.
    pub fn find(&mut self, id: PixelId) -> PixelId {
        let root = self.root(id);

        let mut node = id;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Find the root of `id` without modifying the store.
    ///
    /// After [`flatten`](Self::flatten) this is a single lookup.
    ///
    /// # Panics
    ///
    /// Panics if `id >= len()`.
    pub fn root(&self, id: PixelId) -> PixelId {
        let mut root = id;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        root
    }

    /// Check whether `id` is currently a root.
    #[inline]
    pub fn is_root(&self, id: PixelId) -> bool {
        self.parent[id as usize] == id
    }

    /// Check whether `a` and `b` are in the same set, without modification.
    #[inline]
    pub fn connected(&self, a: PixelId, b: PixelId) -> bool {
        self.root(a) == self.root(b)
    }

    /// Merge the sets containing `a` and `b` and return the surviving root.
    ///
    /// The root of the smaller set is attached under the root of the larger
    /// one. On equal sizes, `b`'s root is attached under `a`'s root. If both
    /// are already in the same set, nothing changes.
    ///
    /// `internal_diff` is left untouched; callers that track it must set it
    /// on the returned root.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is out of range.
    pub fn union(&mut self, a: PixelId, b: PixelId) -> PixelId {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }

        let (keep, absorb) = if self.size[ra as usize] < self.size[rb as usize] {
            (rb, ra)
        } else {
            (ra, rb)
        };
        self.parent[absorb as usize] = keep;
        self.size[keep as usize] += self.size[absorb as usize];
        keep
    }

    /// Merge the set containing `b` into the set containing `a`.
    ///
    /// Unlike [`union`](Self::union), `a`'s root always survives,
    /// whatever the sizes. Returns that root.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is out of range.
    pub fn union_into(&mut self, a: PixelId, b: PixelId) -> PixelId {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[rb as usize] = ra;
            self.size[ra as usize] += self.size[rb as usize];
        }
        ra
    }

    /// Size of the set containing `id`.
    pub fn size(&mut self, id: PixelId) -> u32 {
        let root = self.find(id);
        self.size[root as usize]
    }

    /// Internal difference stored at the root of `id`.
    pub fn internal_diff(&mut self, id: PixelId) -> f64 {
        let root = self.find(id);
        self.internal_diff[root as usize]
    }

    /// Set the internal difference at the root of `id`.
    pub fn set_internal_diff(&mut self, id: PixelId, value: f64) {
        let root = self.find(id);
        self.internal_diff[root as usize] = value;
    }

    /// Point every element directly at its root.
    pub fn flatten(&mut self) {
        for id in 0..self.parent.len() as PixelId {
            self.find(id);
        }
    }

    /// Root of every element, indexed by id.
    pub fn labels(&mut self) -> Vec<PixelId> {
        (0..self.parent.len() as PixelId)
            .map(|id| self.find(id))
            .collect()
    }

    /// Distinct roots in ascending id order.
    pub fn roots(&self) -> Vec<PixelId> {
        (0..self.parent.len() as PixelId)
            .filter(|&id| self.is_root(id))
            .collect()
    }

    /// Number of disjoint sets.
    pub fn component_count(&self) -> usize {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(id, &p)| id as PixelId == p)
            .count()
    }

    /// All ids whose root is `root`'s root, in ascending order.
    pub fn members(&mut self, root: PixelId) -> Vec<PixelId> {
        let root = self.find(root);
        (0..self.parent.len() as PixelId)
            .filter(|&id| self.find(id) == root)
            .collect()
    }
}
