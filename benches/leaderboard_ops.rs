//! Benchmark suite for core leaderboard operations
//!
//! Measures score updates and rank-window reads against a populated board
//! using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use divan::Bencher;
use leaderboard_service::core::LeaderboardService;
use leaderboard_service::types::CustomerId;
use rust_decimal::Decimal;

fn main() {
    divan::main();
}

const BOARD_SIZE: i64 = 10_000;

/// Build a board of `customers` entries with spread-out positive scores
fn populated(customers: i64) -> LeaderboardService {
    let service = LeaderboardService::new();
    for customer in 0..customers {
        service
            .update_score(customer, Decimal::from(customer % 997 + 1))
            .unwrap();
    }
    service
}

/// Re-score existing customers, exercising index remove + insert
#[divan::bench]
fn update_existing_customers(bencher: Bencher) {
    let service = populated(BOARD_SIZE);
    let mut next: CustomerId = 0;
    bencher.bench_local(move || {
        next = (next + 1) % BOARD_SIZE;
        service.update_score(next, Decimal::ONE).unwrap()
    });
}

/// First-time updates, exercising registry creation + index insert
#[divan::bench]
fn update_new_customers(bencher: Bencher) {
    let service = LeaderboardService::new();
    let mut next: CustomerId = 0;
    bencher.bench_local(move || {
        next += 1;
        service.update_score(next, Decimal::ONE).unwrap()
    });
}

/// The common read: the top of the board
#[divan::bench]
fn top_ten_window(bencher: Bencher) {
    let service = populated(BOARD_SIZE);
    bencher.bench_local(move || service.leaderboard(1, 10).unwrap());
}

/// A window centered deep in the board
#[divan::bench]
fn neighborhood_window(bencher: Bencher) {
    let service = populated(BOARD_SIZE);
    bencher.bench_local(move || service.neighborhood(BOARD_SIZE / 2, 5, 5).unwrap());
}
