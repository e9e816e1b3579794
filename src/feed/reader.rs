use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::config::Config;
use crate::conn::event::ConnectionEvent;
use crate::conn::shared::SharedRegistry;
use crate::feed::message::FeedMessage;
use crate::render::{RenderUpdate, Renderer};

/// Counters for one feed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub lines: usize,
    pub updates: usize,
    pub skipped: usize,
}

/// Opens the configured input and processes it to the end.
pub async fn run<R: Renderer>(cfg: &Config, registry: &SharedRegistry, renderer: &mut R) -> Result<FeedStats> {
    let stats = if cfg.reads_stdin() {
        info!("Reading events from stdin");
        process(BufReader::new(tokio::io::stdin()), registry, renderer).await?
    } else {
        let file = tokio::fs::File::open(&cfg.input)
            .await
            .with_context(|| format!("Failed to open event feed {}", cfg.input))?;
        info!("Reading events from {}", cfg.input);
        process(BufReader::new(file), registry, renderer).await?
    };

    let connections = registry.len().await;
    info!(
        lines = stats.lines,
        updates = stats.updates,
        skipped = stats.skipped,
        connections,
        "Event feed finished"
    );

    Ok(stats)
}

/// Applies every line of `reader` to the registry, rendering each update.
///
/// Lines that are not valid feed messages are logged and skipped, as are
/// single undecodable records inside a batch. Only I/O and renderer
/// failures end the run.
pub async fn process<B, R>(reader: B, registry: &SharedRegistry, renderer: &mut R) -> Result<FeedStats>
where
    B: AsyncBufRead + Unpin,
    R: Renderer,
{
    let mut stats = FeedStats::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await.context("Failed to read event feed")? {
        stats.lines += 1;

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let message = match FeedMessage::parse(line) {
            Ok(message) => message,
            Err(e) => {
                warn!(line = stats.lines, error = %e, "Skipping undecodable feed line");
                stats.skipped += 1;
                continue;
            }
        };

        // Updates are owned; the registry lock is already released here
        for update in apply(message, registry, &mut stats).await {
            renderer.render(&update)?;
            stats.updates += 1;
        }
    }

    Ok(stats)
}

async fn apply(message: FeedMessage, registry: &SharedRegistry, stats: &mut FeedStats) -> Vec<RenderUpdate> {
    match message {
        FeedMessage::Batch { connections } => {
            let events: Vec<ConnectionEvent> = connections
                .into_iter()
                .enumerate()
                .filter_map(|(index, record)| match serde_json::from_value(record) {
                    Ok(event) => Some(event),
                    Err(e) => {
                        warn!(line = stats.lines, index, error = %e, "Skipping undecodable batch record");
                        stats.skipped += 1;
                        None
                    }
                })
                .collect();

            registry.apply_batch(&events).await
        }
        FeedMessage::RequestHeader { id, header } => vec![registry.set_request_header(id, &header).await],
        FeedMessage::ResponseHeader { id, header } => vec![registry.set_response_header(id, &header).await],
        FeedMessage::StartTime { id, time } => vec![registry.set_start_time(id, time).await],
        FeedMessage::ResponseStartTime { id, time } => {
            vec![registry.set_response_start_time(id, time).await]
        }
        FeedMessage::ResponseFinishTime { id, time } => {
            vec![registry.set_response_finish_time(id, time).await]
        }
        FeedMessage::Query { id } => match registry.view(id).await {
            Some(update) => vec![update],
            None => {
                warn!(conn = id, "Connection not found");
                Vec::new()
            }
        },
    }
}
