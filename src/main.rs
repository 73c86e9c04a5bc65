//! Quiz Engine Host Adapter
//!
//! Serves one scoring engine over stdin/stdout for an embedding host.
//! Logs go to stderr; stdout carries protocol replies only.

use tokio::io::{self, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use quiz_engine::{
    VERSION, ScoringConfig, ScoringEngine, SharedEngine,
    host::{self, HostConfig},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let scoring = ScoringConfig::from_env();
    let config = HostConfig::from_env();

    info!("Quiz Engine v{}", VERSION);
    info!(
        "Scoring: base {} + time_left x {} + streak x {}",
        scoring.base_points, scoring.time_bonus_scale, scoring.streak_bonus
    );

    let engine = SharedEngine::new(ScoringEngine::with_config(scoring));
    let stats = host::run(engine, BufReader::new(io::stdin()), io::stdout(), &config).await?;

    info!("Shutting down after {} requests", stats.requests);
    Ok(())
}
