//! Stdio Host Adapter
//!
//! Reads JSON requests line by line, applies them to a [`SharedEngine`],
//! and writes one JSON reply per request. Bad lines get an error reply;
//! only I/O failures stop the loop.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::host::protocol::{ErrorCode, HostReply, HostRequest};
use crate::host::shared::SharedEngine;

/// Host adapter configuration.
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    /// Log drained engine events after each request.
    pub log_events: bool,
    /// Write a `ready` reply before reading requests.
    pub banner: bool,
    /// Leave engine events queued for `take_events` requests.
    pub keep_events: bool,
}

impl HostConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            log_events: env_flag("QUIZ_HOST_LOG_EVENTS"),
            banner: env_flag("QUIZ_HOST_BANNER"),
            keep_events: env_flag("QUIZ_HOST_KEEP_EVENTS"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

/// Host adapter errors.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Reading from or writing to the host failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reply could not be encoded.
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Counters for one adapter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    /// Requests handled successfully.
    pub requests: u64,
    /// Lines rejected as invalid.
    pub rejected: u64,
}

/// Apply one request to the engine.
pub async fn handle_request(engine: &SharedEngine, request: HostRequest) -> HostReply {
    match request {
        HostRequest::AddPlayer { id, name } => engine.add_player(&id, &name).await.into(),
        HostRequest::RemovePlayer { id } => {
            engine.remove_player(&id).await;
            HostReply::Removed
        }
        HostRequest::UpdateScore { id, correct, time_left } => HostReply::Score {
            score: engine.update_score(&id, correct, time_left).await,
        },
        HostRequest::GetLeaderboard => {
            // Board and tier from the same lock so they agree
            engine
                .with_engine(|e| HostReply::Leaderboard {
                    entries: e.get_leaderboard(),
                    tier: e.score_tier(),
                })
                .await
        }
        HostRequest::Standings => HostReply::Standings {
            standings: engine.standings().await,
        },
        HostRequest::ResetScores => HostReply::Reset {
            players: engine.reset_scores().await,
        },
        HostRequest::StateHash => HostReply::StateHash {
            hash: hex::encode(engine.state_hash().await),
        },
        HostRequest::TakeEvents => HostReply::Events {
            events: engine.take_events().await,
        },
        HostRequest::Ping => HostReply::Pong,
    }
}

/// Run the adapter until the reader hits EOF.
pub async fn run<R, W>(
    engine: SharedEngine,
    reader: R,
    mut writer: W,
    config: &HostConfig,
) -> Result<HostStats, HostError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = HostStats::default();
    let mut lines = reader.lines();

    if config.banner {
        let ready = HostReply::Ready {
            version: crate::VERSION.to_string(),
        };
        write_reply(&mut writer, &ready).await?;
    }

    info!("Host adapter ready");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match HostRequest::from_json(line) {
            Ok(request) => {
                debug!(?request, "request");
                stats.requests += 1;
                handle_request(&engine, request).await
            }
            Err(e) => {
                warn!("Invalid request: {}", e);
                stats.rejected += 1;
                HostReply::error(ErrorCode::InvalidRequest, e.to_string())
            }
        };

        write_reply(&mut writer, &reply).await?;

        if config.log_events {
            for event in engine.take_events().await {
                info!(seq = event.seq, "event: {:?}", event.data);
            }
        } else if !config.keep_events {
            // Nobody reads them; don't let the queue fill up
            engine.take_events().await;
        }
    }

    info!(
        "Host closed input ({} requests, {} rejected)",
        stats.requests, stats.rejected
    );
    Ok(stats)
}

async fn write_reply<W>(writer: &mut W, reply: &HostReply) -> Result<(), HostError>
where
    W: AsyncWrite + Unpin,
{
    let json = match reply.to_json() {
        Ok(json) => json,
        Err(e) => HostReply::error(ErrorCode::InternalError, e.to_string()).to_json()?,
    };
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
