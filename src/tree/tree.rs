//! Main VebTree structure: construction and mutation.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::{Result, VebError};
use crate::universe::Split;

/// Largest accepted universe (2^32).
///
/// Keeps the cluster vector length and every split width trivially in
/// range; a 2^64 universe would need a 2^32-slot vector at the root.
const MAX_UNIVERSE: u64 = 1 << 32;

/// Ordered integer set over a fixed universe with sublogarithmic queries.
///
/// A Van Emde Boas tree storing distinct keys from [0, U), U a power of two
/// chosen at construction. Min and max are held directly on each node, so
/// reading them is O(1); every other operation recurses into at most one
/// cluster plus possibly the summary per level, halving the key width each
/// step for O(log log U) worst case.
///
/// # Architecture
/// - Base-case nodes (universe <= 2) store up to two keys in min/max with
///   no substructure
/// - Recursive nodes own a summary tree over non-empty cluster indices and
///   up to sqrt(U) cluster slots
/// - Lazy allocation: a cluster exists only while it holds at least one
///   key; it is dropped the moment it drains
/// - The minimum of a node is held only in its min slot, never in a
///   cluster; this is what keeps insert and successor sublogarithmic
///
/// # Memory
/// O(n log log U) node headers for n stored keys, not O(U). Constructing
/// the tree preallocates only the recursive summary spine.
///
/// # Concurrency
/// None. The tree is single-threaded; wrap it externally if shared.
///
/// # Example
/// ```rust
/// use veb_tree::VebTree;
///
/// let mut tree = VebTree::new(16)?;
/// tree.insert(3)?;
/// tree.insert(11)?;
/// assert_eq!(tree.min(), Some(3));
/// assert_eq!(tree.successor(3), Some(11));
/// assert_eq!(tree.successor(11), None);
/// # Ok::<(), veb_tree::VebError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VebTree {
    /// Universe size; a power of two, fixed at construction.
    pub(crate) universe: u64,

    /// Count of distinct keys stored in this subtree.
    pub(crate) len: u64,

    /// Smallest stored key. Held only here, never in a cluster.
    pub(crate) min: Option<u64>,

    /// Largest stored key. Also stored in a cluster unless len <= 1.
    pub(crate) max: Option<u64>,

    /// Cached high/low split arithmetic for this level.
    pub(crate) split: Split,

    /// Tracks the indices of non-empty clusters. None iff base case.
    pub(crate) summary: Option<Box<VebTree>>,

    /// Lazily allocated sub-trees, one slot per cluster. Empty iff base
    /// case. An absent slot is a logically empty cluster.
    pub(crate) clusters: Vec<Option<Box<VebTree>>>,
}

impl VebTree {
    /// Create an empty tree over the universe [0, `universe_size`).
    ///
    /// The core is strict: `universe_size` must be a power of two between
    /// 1 and 2^32 inclusive. Callers that want rounding can apply
    /// [`u64::next_power_of_two`] first.
    ///
    /// # Errors
    /// - [`VebError::InvalidUniverse`] if `universe_size` is zero or not a
    ///   power of two
    /// - [`VebError::UniverseTooLarge`] if `universe_size` exceeds 2^32
    ///
    /// # Performance
    /// O(sqrt(U)) - allocates the empty cluster slot vector and the
    /// recursive summary spine, but no clusters.
    ///
    /// # Example
    /// ```rust
    /// use veb_tree::{VebError, VebTree};
    ///
    /// assert!(VebTree::new(16).is_ok());
    /// assert_eq!(VebTree::new(24), Err(VebError::InvalidUniverse(24)));
    /// assert_eq!(VebTree::new(0), Err(VebError::InvalidUniverse(0)));
    /// ```
    pub fn new(universe_size: u64) -> Result<Self> {
        if universe_size == 0 || !universe_size.is_power_of_two() {
            return Err(VebError::InvalidUniverse(universe_size));
        }
        if universe_size > MAX_UNIVERSE {
            return Err(VebError::UniverseTooLarge(universe_size));
        }
        Ok(Self::with_universe(universe_size))
    }

    /// Build a node for an already-validated power-of-two universe.
    fn with_universe(universe: u64) -> Self {
        if universe <= 2 {
            return VebTree {
                universe,
                len: 0,
                min: None,
                max: None,
                split: Split::base(),
                summary: None,
                clusters: Vec::new(),
            };
        }

        let split = Split::for_universe(universe);
        let num_clusters = split.num_clusters(universe);
        VebTree {
            universe,
            len: 0,
            min: None,
            max: None,
            split,
            summary: Some(Box::new(Self::with_universe(num_clusters))),
            clusters: vec![None; num_clusters as usize],
        }
    }

    /// Insert a key into the set.
    ///
    /// # Arguments
    /// * `key` - Key to insert; must be in [0, universe)
    ///
    /// # Returns
    /// * `Ok(true)` if the key was newly inserted
    /// * `Ok(false)` if the key was already present (set unchanged)
    ///
    /// # Errors
    /// [`VebError::OutOfRange`] if `key >= universe_size()`; the set is
    /// left unchanged.
    ///
    /// # Performance
    /// O(log log U) - at most one of the summary insert and the cluster
    /// insert does recursive work per level: an empty target cluster is
    /// filled in O(1) while the recursion goes into the summary, and a
    /// non-empty one needs no summary update at all.
    ///
    /// # Example
    /// ```rust
    /// use veb_tree::VebTree;
    ///
    /// let mut tree = VebTree::new(16)?;
    /// assert!(tree.insert(9)?);
    /// assert!(!tree.insert(9)?);
    /// assert!(tree.insert(16).is_err());
    /// # Ok::<(), veb_tree::VebError>(())
    /// ```
    pub fn insert(&mut self, key: u64) -> Result<bool> {
        if key >= self.universe {
            return Err(VebError::OutOfRange {
                key,
                universe: self.universe,
            });
        }
        if self.contains(key) {
            return Ok(false);
        }
        self.insert_fresh(key);
        Ok(true)
    }

    /// Insert a key known to be in range and absent from this subtree.
    fn insert_fresh(&mut self, mut key: u64) {
        let (Some(min), Some(max)) = (self.min, self.max) else {
            self.fill_empty(key);
            return;
        };

        if self.is_base() {
            if key < min {
                self.min = Some(key);
            }
            if key > max {
                self.max = Some(key);
            }
            self.len += 1;
            return;
        }

        if key < min {
            // The new key takes over the min slot; the old minimum is what
            // descends into a cluster from here on.
            self.min = Some(key);
            key = min;
        }
        if key > max {
            self.max = Some(key);
        }

        let cluster_universe = self.split.cluster_universe();
        let h = self.split.high(key);
        let l = self.split.low(key);

        let cluster = self.clusters[h as usize]
            .get_or_insert_with(|| Box::new(Self::with_universe(cluster_universe)));

        if cluster.min.is_none() {
            // Empty cluster: fill it in O(1); the real recursion is the
            // summary update.
            cluster.fill_empty(l);
            self.summary_mut().insert_fresh(h);
        } else {
            cluster.insert_fresh(l);
        }
        self.len += 1;
    }

    /// Remove a key from the set.
    ///
    /// # Arguments
    /// * `key` - Key to remove
    ///
    /// # Returns
    /// * `true` if the key was present and removed
    /// * `false` if the key was absent or out of range (set unchanged)
    ///
    /// # Performance
    /// O(log log U) - when a cluster drains it is dropped and its index
    /// removed from the summary, but the drain case means the cluster
    /// removal itself was O(1), so only one recursion is deep per level.
    ///
    /// # Example
    /// ```rust
    /// use veb_tree::VebTree;
    ///
    /// let mut tree = VebTree::new(16)?;
    /// tree.insert(9)?;
    /// assert!(tree.remove(9));
    /// assert!(!tree.remove(9));
    /// assert!(!tree.remove(99));
    /// # Ok::<(), veb_tree::VebError>(())
    /// ```
    pub fn remove(&mut self, key: u64) -> bool {
        if key >= self.universe || !self.contains(key) {
            return false;
        }
        self.remove_present(key);
        true
    }

    /// Remove a key known to be present in this subtree.
    fn remove_present(&mut self, mut key: u64) {
        if self.is_base() {
            if self.len == 1 {
                self.mark_empty();
            } else if Some(key) == self.min {
                self.min = self.max;
                self.len -= 1;
            } else {
                self.max = self.min;
                self.len -= 1;
            }
            return;
        }

        // Sole key lives only in the min slot; no cluster to touch.
        if self.len == 1 {
            self.mark_empty();
            return;
        }

        if Some(key) == self.min {
            // Promote the smallest clustered key into the min slot, then
            // fall through to remove it from its cluster: it no longer
            // occupies a cluster position, only min.
            let first = self
                .summary()
                .min
                .expect("node with len > 1 has a non-empty summary");
            let low = self.clusters[first as usize]
                .as_ref()
                .expect("summary tracks only allocated clusters")
                .min
                .expect("present clusters are non-empty");
            key = self.split.index(first, low);
            self.min = Some(key);
        }

        let h = self.split.high(key);
        let l = self.split.low(key);

        let drained = {
            let cluster = self.clusters[h as usize]
                .as_mut()
                .expect("removal descends into an allocated cluster");
            cluster.remove_present(l);
            cluster.min.is_none()
        };

        if drained {
            // Drop the empty cluster and clear its summary bit.
            self.clusters[h as usize] = None;
            self.summary_mut().remove_present(h);

            if Some(key) == self.max {
                self.max = match self.summary().max {
                    // No clustered keys remain; max falls back to min.
                    None => self.min,
                    Some(last) => {
                        let high = self.clusters[last as usize]
                            .as_ref()
                            .expect("summary tracks only allocated clusters")
                            .max
                            .expect("present clusters are non-empty");
                        Some(self.split.index(last, high))
                    }
                };
            }
        } else if Some(key) == self.max {
            let offset = self.clusters[h as usize]
                .as_ref()
                .expect("removal descends into an allocated cluster")
                .max
                .expect("present clusters are non-empty");
            self.max = Some(self.split.index(h, offset));
        }

        self.len -= 1;
    }

    /// Remove every key, restoring the just-constructed state.
    ///
    /// Drops all clusters and recursively clears the summary spine.
    /// Idempotent.
    ///
    /// # Example
    /// ```rust
    /// use veb_tree::VebTree;
    ///
    /// let mut tree = VebTree::new(16)?;
    /// tree.insert(5)?;
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.min(), None);
    /// # Ok::<(), veb_tree::VebError>(())
    /// ```
    pub fn clear(&mut self) {
        self.mark_empty();
        if let Some(summary) = self.summary.as_mut() {
            summary.clear();
        }
        for slot in &mut self.clusters {
            *slot = None;
        }
    }

    /// First key into an empty node: both slots, no recursion.
    #[inline]
    pub(crate) fn fill_empty(&mut self, key: u64) {
        self.min = Some(key);
        self.max = Some(key);
        self.len = 1;
    }

    /// Reset to the empty state. Clusters are the caller's concern.
    #[inline]
    fn mark_empty(&mut self) {
        self.min = None;
        self.max = None;
        self.len = 0;
    }

    #[inline(always)]
    pub(crate) fn is_base(&self) -> bool {
        self.universe <= 2
    }

    /// Summary of a recursive node. Base-case nodes never call this.
    #[inline]
    pub(crate) fn summary(&self) -> &VebTree {
        self.summary
            .as_deref()
            .expect("recursive node owns a summary")
    }

    #[inline]
    fn summary_mut(&mut self) -> &mut VebTree {
        self.summary
            .as_deref_mut()
            .expect("recursive node owns a summary")
    }
}

#[cfg(test)]
impl VebTree {
    /// Assert every structural invariant of this node and its subtrees.
    ///
    /// White-box companion to the public contract: summary membership
    /// matches cluster occupancy, min is held outside the clusters, max is
    /// clustered whenever len > 1, and len totals agree at every level.
    pub(crate) fn check_invariants(&self) {
        assert!(
            self.universe.is_power_of_two(),
            "universe {} must be a power of two",
            self.universe
        );

        match (self.min, self.max) {
            (None, None) => assert_eq!(self.len, 0, "empty node has len 0"),
            (Some(mn), Some(mx)) => {
                assert!(mn <= mx, "min {mn} must not exceed max {mx}");
                assert!(mx < self.universe, "max {mx} within universe");
                assert!(self.len >= 1, "non-empty node has len >= 1");
            }
            _ => panic!("min and max must be absent or present together"),
        }

        if self.is_base() {
            assert!(self.summary.is_none(), "base case has no summary");
            assert!(self.clusters.is_empty(), "base case has no clusters");
            let expected = match (self.min, self.max) {
                (None, None) => 0,
                (Some(mn), Some(mx)) if mn == mx => 1,
                _ => 2,
            };
            assert_eq!(self.len, expected, "base case len matches slots in use");
            return;
        }

        let summary = self.summary();
        summary.check_invariants();
        assert_eq!(
            summary.universe,
            self.split.num_clusters(self.universe),
            "summary universe is the cluster count"
        );
        assert_eq!(
            self.clusters.len() as u64,
            self.split.num_clusters(self.universe),
            "cluster slot count is fixed"
        );

        let mut clustered = 0u64;
        for (i, slot) in self.clusters.iter().enumerate() {
            match slot {
                None => assert!(
                    !summary.contains(i as u64),
                    "summary must not track absent cluster {i}"
                ),
                Some(cluster) => {
                    assert!(
                        summary.contains(i as u64),
                        "summary must track non-empty cluster {i}"
                    );
                    assert!(cluster.len >= 1, "present cluster {i} is non-empty");
                    assert_eq!(
                        cluster.universe,
                        self.split.cluster_universe(),
                        "cluster universe is sqrt_size"
                    );
                    cluster.check_invariants();
                    clustered += cluster.len;
                }
            }
        }

        match self.min {
            None => assert_eq!(clustered, 0, "empty node has no clustered keys"),
            Some(mn) => {
                assert_eq!(
                    self.len,
                    clustered + 1,
                    "len counts the clustered keys plus min"
                );
                let h = self.split.high(mn);
                if let Some(cluster) = self.clusters[h as usize].as_ref() {
                    assert!(
                        !cluster.contains(self.split.low(mn)),
                        "min {mn} must not be stored in a cluster"
                    );
                }
            }
        }

        if self.len > 1 {
            let mx = self.max.expect("len > 1 implies max present");
            let cluster = self.clusters[self.split.high(mx) as usize]
                .as_ref()
                .expect("max of a populated node lives in a cluster");
            assert!(
                cluster.contains(self.split.low(mx)),
                "max {mx} must be stored in its cluster"
            );
        }
    }
}
