//! Score registry
//!
//! This module provides the `ScoreRegistry`, the authoritative mapping from
//! customer id to current score. The registry keeps every customer that has
//! ever received an update, including those whose score has fallen to zero
//! or below; the ranked index only mirrors the strictly positive subset.

use crate::types::CustomerId;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Authoritative map of customer ids to current scores
///
/// Entries are created lazily on first update and never removed, except by
/// a bulk re-seed which replaces the whole registry.
#[derive(Debug)]
pub struct ScoreRegistry {
    /// Map of customer ids to current scores
    scores: HashMap<CustomerId, Decimal>,
}

impl ScoreRegistry {
    /// Create a new registry with no customers
    pub fn new() -> Self {
        ScoreRegistry {
            scores: HashMap::new(),
        }
    }

    /// Current score for a customer, zero if the customer is unknown
    ///
    /// A customer that has never been updated is indistinguishable from one
    /// whose deltas have summed to exactly zero.
    pub fn score(&self, customer: CustomerId) -> Decimal {
        self.scores.get(&customer).copied().unwrap_or(Decimal::ZERO)
    }

    /// Current score for a customer, or `None` if the customer is unknown
    pub fn get(&self, customer: CustomerId) -> Option<Decimal> {
        self.scores.get(&customer).copied()
    }

    /// Set a customer's score, returning the previous one if any
    pub fn upsert(&mut self, customer: CustomerId, score: Decimal) -> Option<Decimal> {
        self.scores.insert(customer, score)
    }

    /// Number of customers the registry knows about
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the registry holds no customers
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Remove every customer
    pub fn clear(&mut self) {
        self.scores.clear();
    }
}

impl Default for ScoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_customer_scores_zero() {
        let registry = ScoreRegistry::new();
        assert_eq!(registry.score(1), Decimal::ZERO);
        assert_eq!(registry.get(1), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_upsert_returns_previous_score() {
        let mut registry = ScoreRegistry::new();

        assert_eq!(registry.upsert(1, Decimal::new(100, 0)), None);
        assert_eq!(
            registry.upsert(1, Decimal::new(250, 0)),
            Some(Decimal::new(100, 0))
        );
        assert_eq!(registry.score(1), Decimal::new(250, 0));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_non_positive_scores_are_retained() {
        let mut registry = ScoreRegistry::new();

        registry.upsert(1, Decimal::new(-50, 0));
        registry.upsert(2, Decimal::ZERO);

        assert_eq!(registry.score(1), Decimal::new(-50, 0));
        assert_eq!(registry.get(2), Some(Decimal::ZERO));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_clear_removes_all_customers() {
        let mut registry = ScoreRegistry::new();
        registry.upsert(1, Decimal::ONE);
        registry.upsert(2, Decimal::TWO);

        registry.clear();

        assert!(registry.is_empty());
        assert_eq!(registry.get(1), None);
    }
}
