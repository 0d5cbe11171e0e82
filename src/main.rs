//! Leaderboard Service binary
//!
//! Starts the HTTP server for the in-memory customer leaderboard.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --bind 127.0.0.1:9000
//! cargo run -- --seed-sample-data
//! ```
//!
//! Logging is controlled through `RUST_LOG` (default: `info`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bind failure, server error)

use leaderboard_service::api;
use leaderboard_service::cli;
use leaderboard_service::core::LeaderboardService;
use leaderboard_service::seed;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let service = Arc::new(LeaderboardService::new());
    if args.seed_sample_data {
        let pairs = seed::sample_customers();
        service.initialize_from_seed(&pairs);
        tracing::info!(customers = pairs.len(), "seeded leaderboard with sample dataset");
    }

    if let Err(e) = api::serve(args.bind, service).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
