use serde::Deserialize;

use crate::conn::connection::{ConnectionId, Millis};
use crate::conn::event::deserialize_millis;

/// One line of the event feed, tagged by `op`.
///
/// ```text
/// {"op":"batch","connections":[{"id":1,"channelId":"s1","startTime":100}]}
/// {"op":"requestHeader","id":1,"header":"GET / HTTP/1.1\r\n\r\n"}
/// {"op":"responseFinishTime","id":1,"time":400}
/// {"op":"query","id":1}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum FeedMessage {
    /// Records stay raw so one bad record cannot sink the others.
    Batch { connections: Vec<serde_json::Value> },
    RequestHeader { id: ConnectionId, header: String },
    ResponseHeader { id: ConnectionId, header: String },
    StartTime {
        id: ConnectionId,
        #[serde(deserialize_with = "deserialize_millis")]
        time: Millis,
    },
    ResponseStartTime {
        id: ConnectionId,
        #[serde(deserialize_with = "deserialize_millis")]
        time: Millis,
    },
    ResponseFinishTime {
        id: ConnectionId,
        #[serde(deserialize_with = "deserialize_millis")]
        time: Millis,
    },
    /// Read-only; an unknown id is reported, not created.
    Query { id: ConnectionId },
}

impl FeedMessage {
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}
