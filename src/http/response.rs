use std::collections::HashMap;

use crate::http::request::content_length_field;

/// Structured response header of an observed connection.
///
/// Like [`RequestHeader`](crate::http::request::RequestHeader), every field
/// is optional and the default value is the empty record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeader {
    /// HTTP version token from the status-line.
    pub http_version: Option<String>,
    /// Numeric status code.
    pub status: Option<u16>,
    /// Reason phrase, e.g. "Not Found".
    pub description: Option<String>,
    /// Response body length, when known.
    pub content_length: Option<u64>,
    /// Header fields, names exactly as received.
    pub fields: HashMap<String, String>,
}

impl ResponseHeader {
    pub(crate) fn from_status_line(
        http_version: &str,
        status: u16,
        description: &str,
        fields: HashMap<String, String>,
    ) -> Self {
        let content_length = content_length_field(&fields);

        Self {
            http_version: Some(http_version.to_string()),
            status: Some(status),
            description: Some(description.to_string()),
            content_length,
            fields,
        }
    }

    /// Builds a record from the structured fields of a batch event.
    pub fn from_summary(status: Option<u16>, content_length: Option<u64>) -> Self {
        Self {
            status,
            content_length,
            ..Self::default()
        }
    }

    /// Looks up a header field by its exact name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(|v| v.as_str())
    }
}
