//! Order-statistic ranked index
//!
//! This module provides the `RankedIndex`, the ordered structure behind the
//! leaderboard. It holds `CustomerScore` entries in the composite order
//! (score descending, customer id ascending) and answers rank queries in
//! logarithmic time.
//!
//! # Structure
//!
//! The index is a probabilistic skip list. Every node carries, per level, a
//! forward pointer and a *span*: the number of bottom-level steps that
//! pointer traverses. Summing the spans along a descending-level search path
//! yields the 1-based rank of any node, which gives:
//!
//! - `insert` / `remove`: expected O(log N)
//! - `rank_of`: expected O(log N)
//! - `range_by_rank`: expected O(log N + k) for a window of k entries
//!
//! Node heights follow a geometric distribution with p = 0.5, capped at 32
//! levels. Nodes live in a `Vec` and link to each other by index; removed
//! slots are recycled through a free list.

use crate::types::CustomerScore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Maximum node height
const MAX_LEVEL: usize = 32;

/// Probability of promoting a node one more level
const LEVEL_PROBABILITY: f64 = 0.5;

/// Slot of the head sentinel in the node arena
const HEAD: usize = 0;

/// One level of a node: a forward link and the number of bottom-level steps
/// it covers. For a node whose forward link is empty the span tracks the
/// distance to the end of the list, which keeps the insertion arithmetic
/// uniform across levels.
#[derive(Debug, Clone)]
struct Level {
    forward: Option<usize>,
    span: usize,
}

impl Level {
    fn empty() -> Self {
        Level {
            forward: None,
            span: 0,
        }
    }
}

/// A skip-list node
///
/// Slot 0 of the arena is the head sentinel; its entry is a placeholder that
/// search never compares against.
#[derive(Debug, Clone)]
struct Node {
    entry: CustomerScore,
    levels: Vec<Level>,
}

/// Order-statistic skip list over `CustomerScore` entries
///
/// Entries are unique by their full (score, customer) pair. The structure
/// has no state beyond its contents: all operations complete without
/// blocking, and an empty index is indistinguishable from a fresh one.
#[derive(Debug)]
pub struct RankedIndex {
    /// Node arena; slot 0 is the head sentinel
    nodes: Vec<Node>,

    /// Recycled arena slots available for reuse
    free: Vec<usize>,

    /// Number of levels currently in use (at least 1)
    level: usize,

    /// Number of entries
    len: usize,

    /// Height generator for new nodes
    rng: StdRng,
}

impl RankedIndex {
    /// Create a new empty index with an entropy-seeded height generator
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Create a new empty index with a fixed height-generator seed
    ///
    /// Rank results never depend on the seed; only the internal level
    /// structure does. A fixed seed makes structural tests reproducible.
    pub fn with_seed(seed: u64) -> Self {
        let head = Node {
            entry: CustomerScore::new(0, Decimal::ZERO),
            levels: vec![Level::empty(); MAX_LEVEL],
        };
        RankedIndex {
            nodes: vec![head],
            free: Vec::new(),
            level: 1,
            len: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of entries in the index
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every entry, keeping allocated capacity
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        for level in &mut self.nodes[HEAD].levels {
            *level = Level::empty();
        }
        self.free.clear();
        self.level = 1;
        self.len = 0;
    }

    /// Insert an entry, returning its 1-based rank
    ///
    /// Returns `None` without modifying the index when an entry with the
    /// same (score, customer) pair is already present.
    ///
    /// # Arguments
    ///
    /// * `entry` - The score entry to insert
    ///
    /// # Returns
    ///
    /// `Some(rank)` with the position the new entry occupies, or `None` if
    /// the entry was a duplicate.
    pub fn insert(&mut self, entry: CustomerScore) -> Option<u64> {
        let mut update = [HEAD; MAX_LEVEL];
        let mut rank = [0usize; MAX_LEVEL];

        // Descend towards the insertion point, recording per level the last
        // node before it and the rank of that node.
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            rank[i] = if i + 1 == self.level { 0 } else { rank[i + 1] };
            while let Some(next) = self.nodes[x].levels[i].forward {
                if self.nodes[next].entry < entry {
                    rank[i] += self.nodes[x].levels[i].span;
                    x = next;
                } else {
                    break;
                }
            }
            update[i] = x;
        }

        // Reject duplicates: the pair (score, customer) is globally unique.
        if let Some(next) = self.nodes[update[0]].levels[0].forward {
            if self.nodes[next].entry == entry {
                return None;
            }
        }

        let height = self.random_level();
        if height > self.level {
            for i in self.level..height {
                rank[i] = 0;
                update[i] = HEAD;
                self.nodes[HEAD].levels[i].span = self.len;
            }
            self.level = height;
        }

        let idx = self.alloc(entry, height);
        for i in 0..height {
            let pred = update[i];
            self.nodes[idx].levels[i].forward = self.nodes[pred].levels[i].forward;
            self.nodes[pred].levels[i].forward = Some(idx);

            // Split the predecessor's span around the new node.
            let pred_span = self.nodes[pred].levels[i].span;
            self.nodes[idx].levels[i].span = pred_span - (rank[0] - rank[i]);
            self.nodes[pred].levels[i].span = rank[0] - rank[i] + 1;
        }

        // Levels above the new node's height now step over one more entry.
        for i in height..self.level {
            self.nodes[update[i]].levels[i].span += 1;
        }

        self.len += 1;
        Some((rank[0] + 1) as u64)
    }

    /// Remove an entry, returning the 1-based rank it occupied
    ///
    /// Returns `None` without modifying the index when no entry with this
    /// exact (score, customer) pair is present.
    pub fn remove(&mut self, entry: &CustomerScore) -> Option<u64> {
        let mut update = [HEAD; MAX_LEVEL];
        let mut rank = 0usize;

        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(next) = self.nodes[x].levels[i].forward {
                if self.nodes[next].entry < *entry {
                    rank += self.nodes[x].levels[i].span;
                    x = next;
                } else {
                    break;
                }
            }
            update[i] = x;
        }

        let target = self.nodes[update[0]].levels[0].forward?;
        if self.nodes[target].entry != *entry {
            return None;
        }

        for i in 0..self.level {
            let pred = update[i];
            if self.nodes[pred].levels[i].forward == Some(target) {
                let absorbed = self.nodes[target].levels[i].span;
                self.nodes[pred].levels[i].forward = self.nodes[target].levels[i].forward;
                self.nodes[pred].levels[i].span = self.nodes[pred].levels[i].span - 1 + absorbed;
            } else {
                self.nodes[pred].levels[i].span -= 1;
            }
        }

        while self.level > 1 && self.nodes[HEAD].levels[self.level - 1].forward.is_none() {
            self.level -= 1;
        }

        self.free.push(target);
        self.len -= 1;
        Some((rank + 1) as u64)
    }

    /// Rank of an entry, if present
    ///
    /// The rank is the 1-based position under the composite order. An entry
    /// is found only by its exact (score, customer) pair.
    pub fn rank_of(&self, entry: &CustomerScore) -> Option<u64> {
        let mut rank = 0usize;
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(next) = self.nodes[x].levels[i].forward {
                if self.nodes[next].entry <= *entry {
                    rank += self.nodes[x].levels[i].span;
                    x = next;
                } else {
                    break;
                }
            }
            if x != HEAD && self.nodes[x].entry == *entry {
                return Some(rank as u64);
            }
        }
        None
    }

    /// Iterate the entries at ranks `[start, min(end, len)]`
    ///
    /// The iterator is empty when `start` is zero, exceeds the current
    /// length, or exceeds `end`. Locating the first entry costs O(log N);
    /// each subsequent step is O(1).
    pub fn range_by_rank(&self, start: u64, end: u64) -> RangeByRank<'_> {
        let end = end.min(self.len as u64);
        let count = if start == 0 || start > end {
            0
        } else {
            (end - start + 1) as usize
        };
        let first = if count == 0 {
            None
        } else {
            self.node_at_rank(start)
        };
        RangeByRank {
            index: self,
            next: first,
            remaining: count,
        }
    }

    /// Locate the arena slot of the node at a 1-based rank
    fn node_at_rank(&self, rank: u64) -> Option<usize> {
        let target = rank as usize;
        let mut traversed = 0usize;
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(next) = self.nodes[x].levels[i].forward {
                if traversed + self.nodes[x].levels[i].span <= target {
                    traversed += self.nodes[x].levels[i].span;
                    x = next;
                } else {
                    break;
                }
            }
            if x != HEAD && traversed == target {
                return Some(x);
            }
        }
        None
    }

    /// Draw a node height from the capped geometric distribution
    fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < MAX_LEVEL && self.rng.random_bool(LEVEL_PROBABILITY) {
            level += 1;
        }
        level
    }

    /// Place an entry in a recycled or fresh arena slot
    fn alloc(&mut self, entry: CustomerScore, height: usize) -> usize {
        let node = Node {
            entry,
            levels: vec![Level::empty(); height],
        };
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }
}

impl Default for RankedIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a contiguous rank window, created by
/// [`RankedIndex::range_by_rank`]
#[derive(Debug)]
pub struct RangeByRank<'a> {
    index: &'a RankedIndex,
    next: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for RangeByRank<'a> {
    type Item = &'a CustomerScore;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.next?;
        self.remaining -= 1;
        self.next = self.index.nodes[idx].levels[0].forward;
        Some(&self.index.nodes[idx].entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
