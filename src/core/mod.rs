//! Core business logic module
//!
//! This module contains the leaderboard's core components:
//! - `ranked_index` - Order-statistic skip list over (score, customer) pairs
//! - `score_registry` - Authoritative customer id to score mapping
//! - `service` - Facade combining both behind a single-writer / multi-reader lock

pub mod ranked_index;
pub mod score_registry;
pub mod service;

pub use ranked_index::RankedIndex;
pub use score_registry::ScoreRegistry;
pub use service::LeaderboardService;
