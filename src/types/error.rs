//! Error types for the leaderboard service
//!
//! This module defines all errors the service facade can report. Each error
//! falls into one of three classes that the HTTP layer maps onto status
//! codes:
//!
//! - **Invalid argument**: a caller-supplied parameter violates a
//!   precondition; no state is mutated.
//! - **Not found**: the requested customer is not on the leaderboard.
//! - **Internal**: an unanticipated failure such as decimal overflow.

use crate::types::CustomerId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the leaderboard service
///
/// Each variant carries enough context to produce a useful caller-facing
/// message. Precondition checks happen before any write, so an error never
/// leaves the registry or index partially mutated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LeaderboardError {
    /// A score delta outside the allowed per-update range
    ///
    /// Deltas must lie in the closed range [-1000, +1000].
    #[error("Delta {delta} for customer {customer} is outside the allowed range [-1000, 1000]")]
    DeltaOutOfRange {
        /// Customer the update was addressed to
        customer: CustomerId,
        /// The rejected delta
        delta: Decimal,
    },

    /// A rank range that violates `1 <= start <= end`
    #[error("Invalid rank range: start {start}, end {end} (require 1 <= start <= end)")]
    InvalidRange {
        /// Requested start rank
        start: i64,
        /// Requested end rank
        end: i64,
    },

    /// A neighbor window with a negative extent
    #[error("Invalid neighbor window: high {high}, low {low} (both must be non-negative)")]
    InvalidWindow {
        /// Requested count of higher-ranked neighbors
        high: i64,
        /// Requested count of lower-ranked neighbors
        low: i64,
    },

    /// The customer is absent from the leaderboard
    ///
    /// Raised for neighbor queries against customers that were never updated
    /// or whose current score is not strictly positive.
    #[error("Customer {customer} is not on the leaderboard")]
    CustomerNotRanked {
        /// The customer that was looked up
        customer: CustomerId,
    },

    /// Decimal arithmetic overflow
    ///
    /// Cumulative scores are held in a 96-bit decimal; an update that would
    /// overflow it is rejected and the state left unchanged.
    #[error("Arithmetic overflow in {operation} for customer {customer}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Customer the operation was addressed to
        customer: CustomerId,
    },
}

// Helper functions for creating common errors

impl LeaderboardError {
    /// Create a DeltaOutOfRange error
    pub fn delta_out_of_range(customer: CustomerId, delta: Decimal) -> Self {
        LeaderboardError::DeltaOutOfRange { customer, delta }
    }

    /// Create an InvalidRange error
    pub fn invalid_range(start: i64, end: i64) -> Self {
        LeaderboardError::InvalidRange { start, end }
    }

    /// Create an InvalidWindow error
    pub fn invalid_window(high: i64, low: i64) -> Self {
        LeaderboardError::InvalidWindow { high, low }
    }

    /// Create a CustomerNotRanked error
    pub fn customer_not_ranked(customer: CustomerId) -> Self {
        LeaderboardError::CustomerNotRanked { customer }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, customer: CustomerId) -> Self {
        LeaderboardError::ArithmeticOverflow {
            operation: operation.to_string(),
            customer,
        }
    }
}
