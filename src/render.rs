//! Rendering seam.
//!
//! The core carries no UI. A [`Renderer`] receives a [`RenderUpdate`] each
//! time a connection changes and turns it into whatever visual form the
//! host wants. Two stock renderers ship with the crate: JSON lines for a
//! separate visualization process, and a plain-text waterfall.

use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use crate::conn::connection::{Connection, ConnectionId, Millis};
use crate::conn::snapshot::ConnectionSnapshot;

/// Everything a renderer needs to draw one waterfall row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderUpdate {
    pub snapshot: ConnectionSnapshot,
    pub name: String,
    pub host: Option<String>,
    pub method: Option<String>,
    pub status: Option<u16>,
    pub response_content_length: Option<u64>,
    /// Milliseconds between the waterfall origin and this connection's start.
    pub offset: Option<Millis>,
}

impl RenderUpdate {
    pub fn id(&self) -> ConnectionId {
        self.snapshot.id
    }

    /// Places the row relative to `origin`, the earliest start in the registry.
    pub fn with_origin(mut self, origin: Option<Millis>) -> Self {
        self.offset = match (self.snapshot.start_time, origin) {
            (Some(start), Some(origin)) => Some(start.saturating_sub(origin)),
            _ => None,
        };
        self
    }
}

impl From<&Connection> for RenderUpdate {
    fn from(conn: &Connection) -> Self {
        Self {
            snapshot: conn.snapshot(),
            name: conn.display_name(),
            host: conn.host().map(str::to_string),
            method: conn.method().map(str::to_string),
            status: conn.status(),
            response_content_length: conn.response_content_length(),
            offset: None,
        }
    }
}

/// Consumes connection updates and produces a visual update.
pub trait Renderer {
    fn render(&mut self, update: &RenderUpdate) -> anyhow::Result<()>;
}

/// Writes each snapshot as one JSON object per line.
pub struct JsonLinesRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, update: &RenderUpdate) -> anyhow::Result<()> {
        let line = update.snapshot.to_json().context("Failed to serialize snapshot")?;
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Draws each update as a text row with a wait/response bar.
///
/// The bar uses `.` for wait time and `=` for response time, one character
/// per `scale_ms` milliseconds, at least one character for each part. Rows
/// with an offset are indented by it on the same scale.
pub struct TextRenderer<W: Write> {
    out: W,
    scale_ms: u64,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, scale_ms: u64) -> Self {
        Self {
            out,
            scale_ms: scale_ms.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn units(&self, ms: Millis) -> u64 {
        ms.saturating_add(self.scale_ms / 2) / self.scale_ms
    }

    /// Bar length for a duration, rounded to the nearest unit, never zero.
    fn bar_len(&self, ms: Millis) -> usize {
        usize::try_from(self.units(ms).max(1)).unwrap_or(usize::MAX)
    }

    fn indent(&self, offset: Option<Millis>) -> String {
        let units = offset.map(|ms| self.units(ms)).unwrap_or(0);
        " ".repeat(usize::try_from(units).unwrap_or(0))
    }

    fn format_row(&self, update: &RenderUpdate) -> String {
        let snap = &update.snapshot;
        let detail = format!(
            "{} {} {}",
            update.method.as_deref().unwrap_or("?"),
            update.status.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
            format_size(update.response_content_length),
        );

        let bar = match (snap.wait_time, snap.response_time) {
            (Some(wait), Some(response)) => format!(
                "{}|{}{}| {}/{}ms",
                self.indent(update.offset),
                ".".repeat(self.bar_len(wait)),
                "=".repeat(self.bar_len(response)),
                wait,
                wait.saturating_add(response)
            ),
            (Some(wait), None) => format!(
                "{}|{}| {}/?ms",
                self.indent(update.offset),
                ".".repeat(self.bar_len(wait)),
                wait
            ),
            _ => "| ?".to_string(),
        };

        format!(
            "[{}] {:<24} {:<24} {:<16} {}",
            snap.channel_id.as_deref().unwrap_or("-"),
            update.name,
            update.host.as_deref().unwrap_or("?"),
            detail,
            bar
        )
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, update: &RenderUpdate) -> anyhow::Result<()> {
        let row = self.format_row(update);
        writeln!(self.out, "{}", row)?;
        self.out.flush()?;
        Ok(())
    }
}

fn format_size(bytes: Option<u64>) -> String {
    match bytes {
        Some(b) => format!("{:.1}KB", b as f64 / 1000.0),
        None => "?KB".to_string(),
    }
}
