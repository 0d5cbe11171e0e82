//! Customer-related types for the leaderboard service
//!
//! This module defines the customer identifier, the composite-ordered score
//! entry used by the ranked index, and the record types produced by read
//! operations.

use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

/// Customer identifier
///
/// Supports the full signed 64-bit integer range.
pub type CustomerId = i64;

/// A customer's score entry as held by the ranked index
///
/// Entries are immutable once constructed; a score change is modeled as
/// removing the old entry and inserting a new one. Two entries order by
/// score **descending** first, then by customer id **ascending**, so the
/// smallest entry under this order occupies rank 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerScore {
    /// The customer this entry belongs to
    pub customer: CustomerId,

    /// The customer's score at the time the entry was created
    pub score: Decimal,
}

impl CustomerScore {
    /// Create a new score entry
    pub fn new(customer: CustomerId, score: Decimal) -> Self {
        CustomerScore { customer, score }
    }
}

impl Ord for CustomerScore {
    /// Composite ordering: score descending, then customer id ascending
    ///
    /// An entry that compares `Less` ranks *before* (better than) one that
    /// compares `Greater`. Equality holds only for the same (score, customer)
    /// pair, which is unique within the index because customer ids are unique.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.customer.cmp(&other.customer))
    }
}

impl PartialOrd for CustomerScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A ranked leaderboard record produced by read operations
///
/// Rank is 1-based; rank 1 is the highest-scoring customer. The rank is the
/// absolute position within the full leaderboard, not an offset into the
/// returned window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRanking {
    /// The customer id
    pub customer_id: CustomerId,

    /// The customer's current score
    pub score: Decimal,

    /// The customer's absolute 1-based position on the leaderboard
    pub rank: u64,
}

impl CustomerRanking {
    /// Create a new ranking record
    pub fn new(customer_id: CustomerId, score: Decimal, rank: u64) -> Self {
        CustomerRanking {
            customer_id,
            score,
            rank,
        }
    }
}

/// A point-in-time snapshot of service-level counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetrics {
    /// Number of customers known to the registry, including those with
    /// non-positive scores
    pub total_customers: u64,

    /// Number of customers currently on the leaderboard (score > 0)
    pub leaderboard_customers: u64,

    /// Score at rank 1, or zero when the leaderboard is empty
    pub top_score: Decimal,
}
