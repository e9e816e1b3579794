use serde::Serialize;

use crate::conn::connection::{ConnectionId, Millis};

/// Stable, serializable view of a connection's timing.
///
/// Unknown values serialize as `null`, never as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSnapshot {
    pub id: ConnectionId,
    pub channel_id: Option<String>,
    pub start_time: Option<Millis>,
    pub response_start_time: Option<Millis>,
    pub response_finish_time: Option<Millis>,
    pub wait_time: Option<Millis>,
    pub response_time: Option<Millis>,
    pub session_time: Option<Millis>,
}

impl ConnectionSnapshot {
    /// Serializes to a single-line JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
