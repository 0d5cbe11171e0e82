//! Leaderboard service facade
//!
//! This module provides the `LeaderboardService` that orchestrates the score
//! registry and the ranked index behind a single-writer / multi-reader lock.
//!
//! # Concurrency discipline
//!
//! All state lives under one `parking_lot::RwLock`:
//!
//! - `update_score` and `initialize_from_seed` hold the exclusive guard for
//!   their whole body, so every write is atomic with respect to readers and
//!   all writes form a total order.
//! - `leaderboard`, `neighborhood`, and `metrics` hold the shared guard for
//!   their whole body, including the iteration that materializes the
//!   returned list, so each read observes the state left by some prefix of
//!   the write order.
//!
//! No operation performs I/O or yields while holding a guard; each completes
//! or fails before returning.

use crate::core::ranked_index::RankedIndex;
use crate::core::score_registry::ScoreRegistry;
use crate::types::{CustomerId, CustomerRanking, CustomerScore, LeaderboardError, ServiceMetrics};
use parking_lot::RwLock;
use rust_decimal::Decimal;

/// Registry and index guarded together so their compound updates stay atomic
#[derive(Debug)]
struct BoardState {
    registry: ScoreRegistry,
    index: RankedIndex,
}

/// The leaderboard service
///
/// Maintains an in-memory leaderboard of customers keyed by id, each with a
/// signed decimal score. Customers with a strictly positive score occupy a
/// contiguous 1-based rank sequence ordered by score descending, ties broken
/// by ascending customer id. The service is `Sync`; share it behind an `Arc`
/// and call it from any number of threads.
#[derive(Debug)]
pub struct LeaderboardService {
    state: RwLock<BoardState>,
}

impl LeaderboardService {
    /// Create a new service with no customers
    pub fn new() -> Self {
        LeaderboardService {
            state: RwLock::new(BoardState {
                registry: ScoreRegistry::new(),
                index: RankedIndex::new(),
            }),
        }
    }

    /// Apply a signed delta to a customer's score
    ///
    /// The customer is created with score zero on first update. When the
    /// score crosses zero the customer enters or leaves the ranked index;
    /// registry write and index maintenance happen in one critical section,
    /// so no reader ever observes them out of step.
    ///
    /// # Arguments
    ///
    /// * `customer` - The customer to update
    /// * `delta` - Signed score change, within [-1000, +1000]
    ///
    /// # Returns
    ///
    /// The customer's total score immediately after this update committed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The delta lies outside [-1000, +1000] (no state is modified)
    /// - Adding the delta to the current score would overflow the decimal
    ///   representation (no state is modified)
    pub fn update_score(
        &self,
        customer: CustomerId,
        delta: Decimal,
    ) -> Result<Decimal, LeaderboardError> {
        if delta < -Decimal::ONE_THOUSAND || delta > Decimal::ONE_THOUSAND {
            return Err(LeaderboardError::delta_out_of_range(customer, delta));
        }

        let mut state = self.state.write();

        // The index is keyed by (score, customer), so the previous score
        // must be captured before the registry entry is overwritten.
        let previous = state.registry.score(customer);
        let updated = previous
            .checked_add(delta)
            .ok_or_else(|| LeaderboardError::arithmetic_overflow("update_score", customer))?;

        state.registry.upsert(customer, updated);
        if previous > Decimal::ZERO {
            state.index.remove(&CustomerScore::new(customer, previous));
        }
        if updated > Decimal::ZERO {
            state.index.insert(CustomerScore::new(customer, updated));
        }

        Ok(updated)
    }

    /// Enumerate the leaderboard positions `[start, min(end, N)]`
    ///
    /// Each record carries its absolute rank. The result is empty when
    /// `start` exceeds the current leaderboard size; `end` is clamped
    /// silently.
    ///
    /// # Errors
    ///
    /// Returns an error if `start < 1` or `end < start`.
    pub fn leaderboard(
        &self,
        start: i64,
        end: i64,
    ) -> Result<Vec<CustomerRanking>, LeaderboardError> {
        if start < 1 || end < start {
            return Err(LeaderboardError::invalid_range(start, end));
        }

        let state = self.state.read();
        Ok(Self::collect_window(&state.index, start as u64, end as u64))
    }

    /// Enumerate a rank window centered on a customer
    ///
    /// Returns the customer together with up to `high` better-ranked and
    /// `low` worse-ranked neighbors, clamped at both leaderboard ends. An
    /// empty result means the customer is not on the leaderboard (unknown,
    /// or current score not strictly positive).
    ///
    /// # Errors
    ///
    /// Returns an error if `high < 0` or `low < 0`.
    pub fn neighborhood(
        &self,
        customer: CustomerId,
        high: i64,
        low: i64,
    ) -> Result<Vec<CustomerRanking>, LeaderboardError> {
        if high < 0 || low < 0 {
            return Err(LeaderboardError::invalid_window(high, low));
        }

        let state = self.state.read();
        let score = match state.registry.get(customer) {
            Some(score) if score > Decimal::ZERO => score,
            _ => return Ok(Vec::new()),
        };
        let rank = match state.index.rank_of(&CustomerScore::new(customer, score)) {
            Some(rank) => rank,
            None => return Ok(Vec::new()),
        };

        let start = rank.saturating_sub(high as u64).max(1);
        let end = rank.saturating_add(low as u64);
        Ok(Self::collect_window(&state.index, start, end))
    }

    /// Snapshot of registry size, leaderboard size, and top score
    pub fn metrics(&self) -> ServiceMetrics {
        let state = self.state.read();
        let top_score = state
            .index
            .range_by_rank(1, 1)
            .next()
            .map(|entry| entry.score)
            .unwrap_or(Decimal::ZERO);
        ServiceMetrics {
            total_customers: state.registry.len() as u64,
            leaderboard_customers: state.index.len() as u64,
            top_score,
        }
    }

    /// Replace all state with the given `(customer, score)` pairs
    ///
    /// Clears the registry and the index, then loads every pair; pairs with
    /// a strictly positive score also enter the index. Later occurrences of
    /// a duplicate customer id win, exactly as if the pairs had arrived as a
    /// sequence of individual updates. The whole operation runs under the
    /// exclusive guard.
    pub fn initialize_from_seed(&self, pairs: &[(CustomerId, Decimal)]) {
        let mut state = self.state.write();
        state.registry.clear();
        state.index.clear();
        for &(customer, score) in pairs {
            if let Some(previous) = state.registry.upsert(customer, score) {
                if previous > Decimal::ZERO {
                    state.index.remove(&CustomerScore::new(customer, previous));
                }
            }
            if score > Decimal::ZERO {
                state.index.insert(CustomerScore::new(customer, score));
            }
        }
    }

    /// Materialize a rank window into ranking records
    ///
    /// Runs under a guard held by the caller; the absolute rank of each
    /// record is `start` plus its offset in the window.
    fn collect_window(index: &RankedIndex, start: u64, end: u64) -> Vec<CustomerRanking> {
        index
            .range_by_rank(start, end)
            .enumerate()
            .map(|(offset, entry)| {
                CustomerRanking::new(entry.customer, entry.score, start + offset as u64)
            })
            .collect()
    }
}

impl Default for LeaderboardService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(units: i64, scale: u32) -> Decimal {
        Decimal::new(units, scale)
    }

    #[test]
    fn test_update_creates_customer_lazily() {
        let service = LeaderboardService::new();

        let score = service.update_score(42, dec(1234500, 4)).unwrap();

        assert_eq!(score, dec(1234500, 4));
        let metrics = service.metrics();
        assert_eq!(metrics.total_customers, 1);
        assert_eq!(metrics.leaderboard_customers, 1);
    }

    #[test]
    fn test_update_returns_running_total() {
        let service = LeaderboardService::new();

        assert_eq!(service.update_score(42, dec(12345, 2)).unwrap(), dec(12345, 2));
        assert_eq!(
            service.update_score(42, dec(-2345, 2)).unwrap(),
            dec(10000, 2)
        );

        let rankings = service.leaderboard(1, 1).unwrap();
        assert_eq!(rankings.len(), 1);
        assert_eq!(rankings[0].customer_id, 42);
        assert_eq!(rankings[0].rank, 1);
        assert_eq!(service.metrics().top_score, dec(10000, 2));
    }

    #[rstest]
    #[case::positive_limit(dec(1000, 0))]
    #[case::negative_limit(dec(-1000, 0))]
    #[case::fractional_within(dec(9999999, 4))]
    fn test_delta_within_bounds_is_accepted(#[case] delta: Decimal) {
        let service = LeaderboardService::new();
        assert!(service.update_score(1, delta).is_ok());
    }

    #[rstest]
    #[case::positive_excess(dec(10000001, 4))]
    #[case::negative_excess(dec(-10000001, 4))]
    fn test_delta_out_of_bounds_is_rejected(#[case] delta: Decimal) {
        let service = LeaderboardService::new();

        let result = service.update_score(1, delta);

        assert!(matches!(
            result.unwrap_err(),
            LeaderboardError::DeltaOutOfRange { .. }
        ));
        // The rejected update must not create the customer.
        assert_eq!(service.metrics().total_customers, 0);
    }

    #[test]
    fn test_update_overflow_is_rejected_and_state_unchanged() {
        let service = LeaderboardService::new();
        // Deltas are capped at 1000, so a score near the decimal ceiling can
        // only be staged through the seed path.
        service.initialize_from_seed(&[(1, Decimal::MAX)]);

        let result = service.update_score(1, Decimal::ONE);

        assert!(matches!(
            result.unwrap_err(),
            LeaderboardError::ArithmeticOverflow { .. }
        ));

        // The failed update must leave registry and index untouched.
        let metrics = service.metrics();
        assert_eq!(metrics.total_customers, 1);
        assert_eq!(metrics.leaderboard_customers, 1);
        assert_eq!(metrics.top_score, Decimal::MAX);

        let rankings = service.neighborhood(1, 0, 0).unwrap();
        assert_eq!(rankings.len(), 1);
        assert_eq!(rankings[0].rank, 1);
        assert_eq!(rankings[0].score, Decimal::MAX);
    }

    #[test]
    fn test_equal_scores_rank_by_ascending_id() {
        let service = LeaderboardService::new();
        service.update_score(2, dec(50, 0)).unwrap();
        service.update_score(1, dec(50, 0)).unwrap();
        service.update_score(3, dec(50, 0)).unwrap();

        let rankings = service.leaderboard(1, 3).unwrap();

        let positions: Vec<(CustomerId, u64)> =
            rankings.iter().map(|r| (r.customer_id, r.rank)).collect();
        assert_eq!(positions, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_score_transition_through_zero() {
        let service = LeaderboardService::new();

        service.update_score(7, dec(10, 0)).unwrap();
        assert_eq!(service.metrics().leaderboard_customers, 1);

        // Falling to exactly zero leaves the leaderboard but not the registry.
        assert_eq!(service.update_score(7, dec(-10, 0)).unwrap(), Decimal::ZERO);
        let metrics = service.metrics();
        assert_eq!(metrics.leaderboard_customers, 0);
        assert_eq!(metrics.total_customers, 1);
        assert!(service.neighborhood(7, 0, 0).unwrap().is_empty());

        service.update_score(7, dec(5, 0)).unwrap();
        let rankings = service.neighborhood(7, 0, 0).unwrap();
        assert_eq!(rankings.len(), 1);
        assert_eq!(rankings[0].rank, 1);
        assert_eq!(rankings[0].score, dec(5, 0));
    }

    #[test]
    fn test_negative_score_is_not_ranked() {
        let service = LeaderboardService::new();

        service.update_score(5, dec(-100, 0)).unwrap();

        assert_eq!(service.metrics().total_customers, 1);
        assert_eq!(service.metrics().leaderboard_customers, 0);
        assert!(service.neighborhood(5, 3, 3).unwrap().is_empty());
    }

    #[test]
    fn test_opposite_deltas_restore_state() {
        let service = LeaderboardService::new();
        service.update_score(1, dec(80, 0)).unwrap();
        service.update_score(2, dec(60, 0)).unwrap();

        service.update_score(2, dec(30, 0)).unwrap();
        service.update_score(2, dec(-30, 0)).unwrap();

        assert_eq!(service.metrics().total_customers, 2);
        let rankings = service.leaderboard(1, 2).unwrap();
        assert_eq!(rankings[0].customer_id, 1);
        assert_eq!(rankings[1].customer_id, 2);
        assert_eq!(rankings[1].score, dec(60, 0));
    }

    #[rstest]
    #[case::zero_start(0, 5)]
    #[case::negative_start(-3, 5)]
    #[case::end_before_start(5, 4)]
    fn test_leaderboard_rejects_invalid_range(#[case] start: i64, #[case] end: i64) {
        let service = LeaderboardService::new();

        let result = service.leaderboard(start, end);

        assert!(matches!(
            result.unwrap_err(),
            LeaderboardError::InvalidRange { .. }
        ));
    }

    #[test]
    fn test_leaderboard_clamps_and_empties() {
        let service = LeaderboardService::new();
        for customer in 1..=4 {
            service.update_score(customer, dec(100 - customer, 0)).unwrap();
        }

        // end beyond N clamps silently
        assert_eq!(service.leaderboard(1, 100).unwrap().len(), 4);
        // start beyond N yields an empty window
        assert!(service.leaderboard(5, 9).unwrap().is_empty());
    }

    /// Populate customers 1..=100 so customer i holds score 101 - i
    fn descending_board() -> LeaderboardService {
        let service = LeaderboardService::new();
        for customer in 1..=100 {
            service.update_score(customer, dec(101 - customer, 0)).unwrap();
        }
        service
    }

    #[rstest]
    #[case::clamped_at_top(1, 5, 5, 1, 6)]
    #[case::clamped_at_bottom(100, 5, 5, 95, 100)]
    #[case::interior(50, 2, 3, 48, 53)]
    fn test_neighborhood_windows(
        #[case] customer: CustomerId,
        #[case] high: i64,
        #[case] low: i64,
        #[case] first_rank: u64,
        #[case] last_rank: u64,
    ) {
        let service = descending_board();

        let rankings = service.neighborhood(customer, high, low).unwrap();

        let ranks: Vec<u64> = rankings.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, (first_rank..=last_rank).collect::<Vec<u64>>());
        assert!(rankings.iter().any(|r| r.customer_id == customer));
    }

    #[test]
    fn test_neighborhood_rejects_negative_window() {
        let service = descending_board();

        let result = service.neighborhood(50, -1, 3);

        assert!(matches!(
            result.unwrap_err(),
            LeaderboardError::InvalidWindow { .. }
        ));
    }

    #[test]
    fn test_neighborhood_for_unknown_customer_is_empty() {
        let service = descending_board();
        assert!(service.neighborhood(999, 5, 5).unwrap().is_empty());
    }

    #[test]
    fn test_metrics_on_empty_service() {
        let service = LeaderboardService::new();

        let metrics = service.metrics();

        assert_eq!(metrics.total_customers, 0);
        assert_eq!(metrics.leaderboard_customers, 0);
        assert_eq!(metrics.top_score, Decimal::ZERO);
    }

    #[test]
    fn test_seed_replaces_existing_state() {
        let service = LeaderboardService::new();
        service.update_score(1, dec(500, 0)).unwrap();

        service.initialize_from_seed(&[
            (10, dec(30, 0)),
            (11, dec(-5, 0)),
            (12, Decimal::ZERO),
            (13, dec(80, 0)),
        ]);

        let metrics = service.metrics();
        assert_eq!(metrics.total_customers, 4);
        assert_eq!(metrics.leaderboard_customers, 2);
        assert_eq!(metrics.top_score, dec(80, 0));

        let rankings = service.leaderboard(1, 10).unwrap();
        let ids: Vec<CustomerId> = rankings.iter().map(|r| r.customer_id).collect();
        assert_eq!(ids, vec![13, 10]);
    }

    #[test]
    fn test_seed_duplicate_customer_last_wins() {
        let service = LeaderboardService::new();

        service.initialize_from_seed(&[(1, dec(40, 0)), (1, dec(70, 0)), (1, dec(20, 0))]);

        let metrics = service.metrics();
        assert_eq!(metrics.total_customers, 1);
        assert_eq!(metrics.leaderboard_customers, 1);
        assert_eq!(metrics.top_score, dec(20, 0));
    }
}
