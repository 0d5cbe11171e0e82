use clap::Parser;
use std::net::SocketAddr;

/// Serve an in-memory customer leaderboard over HTTP
#[derive(Parser, Debug)]
#[command(name = "leaderboard-service")]
#[command(about = "In-memory ranked customer leaderboard over HTTP", long_about = None)]
pub struct CliArgs {
    /// Socket address the HTTP server binds to
    #[arg(
        long = "bind",
        value_name = "ADDR",
        default_value = "0.0.0.0:8080",
        help = "Socket address to bind the HTTP server to"
    )]
    pub bind: SocketAddr,

    /// Populate the leaderboard with the built-in sample dataset at startup
    #[arg(
        long = "seed-sample-data",
        help = "Seed the leaderboard with the built-in sample dataset"
    )]
    pub seed_sample_data: bool,
}
