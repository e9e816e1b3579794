use std::collections::HashMap;

use crate::http::uri::split_uri;

/// Structured request header of an observed connection.
///
/// Every field is optional: the record starts out empty and is filled
/// either by parsing a raw header block or from the structured fields of a
/// batch event. An empty record is also what a malformed block leaves behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeader {
    /// Request method as sent (e.g. "GET"). Not validated.
    pub method: Option<String>,
    /// Request-target as it appeared on the request-line.
    pub url: Option<String>,
    /// Host from the target, falling back to the `Host` field.
    pub host: Option<String>,
    /// Path component of the target.
    pub path: Option<String>,
    /// Last path segment, used as the display label.
    pub file: Option<String>,
    /// HTTP version token (typically "HTTP/1.1").
    pub http_version: Option<String>,
    /// Request body length, when known.
    pub content_length: Option<u64>,
    /// Header fields, names exactly as received.
    pub fields: HashMap<String, String>,
}

impl RequestHeader {
    /// Builds a record from a parsed request-line and its fields.
    pub(crate) fn from_request_line(
        method: &str,
        url: &str,
        http_version: &str,
        fields: HashMap<String, String>,
    ) -> Self {
        let uri = split_uri(url);
        let host = uri.host.or_else(|| fields.get("Host").cloned());
        let content_length = content_length_field(&fields);

        Self {
            method: Some(method.to_string()),
            url: Some(url.to_string()),
            host,
            path: Some(uri.path),
            file: Some(uri.file),
            http_version: Some(http_version.to_string()),
            content_length,
            fields,
        }
    }

    /// Builds a record from the structured fields of a batch event.
    ///
    /// The host is taken as given; path and file still come from the URL.
    pub fn from_summary(
        host: Option<&str>,
        url: Option<&str>,
        method: Option<&str>,
        content_length: Option<u64>,
    ) -> Self {
        let uri = url.map(split_uri).unwrap_or_default();

        Self {
            method: method.map(str::to_string),
            url: url.map(str::to_string),
            host: host.map(str::to_string),
            path: url.map(|_| uri.path),
            file: url.map(|_| uri.file),
            http_version: None,
            content_length,
            fields: HashMap::new(),
        }
    }

    /// Looks up a header field by its exact name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(|v| v.as_str())
    }
}

/// Reads a literal `Content-Length` field, ignoring values that are not integers.
pub(crate) fn content_length_field(fields: &HashMap<String, String>) -> Option<u64> {
    fields
        .get("Content-Length")
        .and_then(|v| v.trim().parse().ok())
}
