//! Connection event records delivered in batches by the instrumentation source.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::conn::connection::{ConnectionId, Millis};
use crate::http::request::RequestHeader;
use crate::http::response::ResponseHeader;

/// One connection's state as reported by the source.
///
/// Only `id` is required. Absent timestamps leave the connection's
/// timestamps alone; absent header data leaves its headers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionEvent {
    pub id: ConnectionId,
    #[serde(default)]
    pub channel_id: Option<String>,

    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub request_content_length: Option<u64>,
    #[serde(default)]
    pub response_content_length: Option<u64>,

    /// Raw request header block, preferred over the structured fields.
    #[serde(default)]
    pub request_header: Option<String>,
    /// Raw response header block, preferred over the structured fields.
    #[serde(default)]
    pub response_header: Option<String>,

    #[serde(default, deserialize_with = "deserialize_opt_millis")]
    pub start_time: Option<Millis>,
    #[serde(default, deserialize_with = "deserialize_opt_millis")]
    pub response_start_time: Option<Millis>,
    #[serde(default, deserialize_with = "deserialize_opt_millis")]
    pub response_finish_time: Option<Millis>,
}

impl ConnectionEvent {
    /// Creates an event carrying nothing but an id.
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Whether any of the structured header fields is present.
    pub fn has_summary(&self) -> bool {
        self.host.is_some()
            || self.url.is_some()
            || self.method.is_some()
            || self.status.is_some()
            || self.request_content_length.is_some()
            || self.response_content_length.is_some()
    }

    /// Header records built from the structured fields.
    pub fn summary_headers(&self) -> (RequestHeader, ResponseHeader) {
        let request = RequestHeader::from_summary(
            self.host.as_deref(),
            self.url.as_deref(),
            self.method.as_deref(),
            self.request_content_length,
        );
        let response = ResponseHeader::from_summary(self.status, self.response_content_length);

        (request, response)
    }
}

/// Converts a JSON number of milliseconds, rounding fractions to the
/// nearest millisecond. Negative and non-finite values are rejected.
pub(crate) fn millis_from_f64(value: f64) -> Option<Millis> {
    if value.is_finite() && value >= 0.0 && value <= u64::MAX as f64 {
        Some(value.round() as Millis)
    } else {
        None
    }
}

pub(crate) fn deserialize_millis<'de, D>(deserializer: D) -> Result<Millis, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    millis_from_f64(value).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", value)))
}

pub(crate) fn deserialize_opt_millis<'de, D>(deserializer: D) -> Result<Option<Millis>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(value) => millis_from_f64(value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", value))),
        None => Ok(None),
    }
}
