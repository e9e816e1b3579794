use crate::conn::snapshot::ConnectionSnapshot;
use crate::http::parser::{parse_request_header, parse_response_header};
use crate::http::request::RequestHeader;
use crate::http::response::ResponseHeader;

/// Connection identifier assigned by the instrumentation source.
pub type ConnectionId = u64;

/// Timestamp in milliseconds on the source's monotonic clock.
pub type Millis = u64;

/// One observed HTTP exchange.
///
/// Holds the two header records and the three lifecycle timestamps. The
/// timestamp setters keep `start <= response_start <= response_finish`
/// for whichever of them are set, whatever order values arrive in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    id: ConnectionId,
    channel_id: Option<String>,
    request_header: RequestHeader,
    response_header: ResponseHeader,
    start_time: Option<Millis>,
    response_start_time: Option<Millis>,
    response_finish_time: Option<Millis>,
}

impl Connection {
    /// Creates a connection with empty headers and no timestamps.
    ///
    /// A `channel_id` of `None` places it in the ungrouped bucket.
    pub fn new(id: ConnectionId, channel_id: Option<String>) -> Self {
        Self {
            id,
            channel_id,
            request_header: RequestHeader::default(),
            response_header: ResponseHeader::default(),
            start_time: None,
            response_start_time: None,
            response_finish_time: None,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn channel_id(&self) -> Option<&str> {
        self.channel_id.as_deref()
    }

    pub fn request_header(&self) -> &RequestHeader {
        &self.request_header
    }

    pub fn response_header(&self) -> &ResponseHeader {
        &self.response_header
    }

    /// Replaces the request header with a parsed raw block.
    ///
    /// A malformed block leaves the empty record behind.
    pub fn set_request_header(&mut self, raw: &str) -> &mut Self {
        self.request_header = parse_request_header(raw).unwrap_or_else(|e| {
            tracing::warn!(conn = self.id, error = %e, "Malformed request header");
            RequestHeader::default()
        });
        self
    }

    /// Replaces the response header with a parsed raw block.
    ///
    /// A malformed block leaves the empty record behind.
    pub fn set_response_header(&mut self, raw: &str) -> &mut Self {
        self.response_header = parse_response_header(raw).unwrap_or_else(|e| {
            tracing::warn!(conn = self.id, error = %e, "Malformed response header");
            ResponseHeader::default()
        });
        self
    }

    /// Replaces both header records with already structured ones.
    pub fn set_headers(&mut self, request: RequestHeader, response: ResponseHeader) -> &mut Self {
        self.request_header = request;
        self.response_header = response;
        self
    }

    /// Sets the request start time.
    ///
    /// A start later than the recorded response start collapses the whole
    /// window onto `time`. An earlier start is taken as-is.
    pub fn set_start_time(&mut self, time: Millis) -> &mut Self {
        self.start_time = Some(time);

        if self.response_start_time.is_some_and(|rs| time > rs) {
            self.response_start_time = Some(time);
            self.response_finish_time = Some(time);
        }
        self
    }

    /// Sets the time the first response byte arrived.
    ///
    /// Anchors an unset start time to `time`, is clamped up to the start
    /// time, and drags a smaller finish time forward.
    pub fn set_response_start_time(&mut self, mut time: Millis) -> &mut Self {
        let start = match self.start_time {
            Some(start) => start,
            None => {
                self.set_start_time(time);
                time
            }
        };

        if time < start {
            time = start;
        }

        if self.response_finish_time.is_some_and(|rf| time > rf) {
            self.response_finish_time = Some(time);
        }

        self.response_start_time = Some(time);
        self
    }

    /// Sets the time the complete response arrived.
    ///
    /// Anchors unset earlier timestamps to `time` and is clamped up to the
    /// response start time.
    pub fn set_response_finish_time(&mut self, mut time: Millis) -> &mut Self {
        if self.response_start_time.is_none() {
            self.set_response_start_time(time);
        }

        if let Some(rs) = self.response_start_time {
            if rs > time {
                time = rs;
            }
        }

        self.response_finish_time = Some(time);
        self
    }

    pub fn start_time(&self) -> Option<Millis> {
        self.start_time
    }

    pub fn response_start_time(&self) -> Option<Millis> {
        self.response_start_time
    }

    pub fn response_finish_time(&self) -> Option<Millis> {
        self.response_finish_time
    }

    /// Time between request start and first response byte.
    pub fn wait_time(&self) -> Option<Millis> {
        self.response_start_time?.checked_sub(self.start_time?)
    }

    /// Time spent receiving the response.
    pub fn response_time(&self) -> Option<Millis> {
        self.response_finish_time?.checked_sub(self.response_start_time?)
    }

    /// Whole duration from request start to complete response.
    pub fn session_time(&self) -> Option<Millis> {
        self.response_finish_time?.checked_sub(self.start_time?)
    }

    /// Label for the waterfall row: the requested file, else the id.
    pub fn display_name(&self) -> String {
        match self.request_header.file.as_deref() {
            Some(file) if !file.is_empty() => file.to_string(),
            _ => self.id.to_string(),
        }
    }

    pub fn full_url(&self) -> Option<&str> {
        self.request_header.url.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.request_header.host.as_deref()
    }

    pub fn method(&self) -> Option<&str> {
        self.request_header.method.as_deref()
    }

    pub fn status(&self) -> Option<u16> {
        self.response_header.status
    }

    pub fn response_content_length(&self) -> Option<u64> {
        self.response_header.content_length
    }

    /// Captures the timing state for a visualization consumer.
    pub fn snapshot(&self) -> ConnectionSnapshot {
        ConnectionSnapshot {
            id: self.id,
            channel_id: self.channel_id.clone(),
            start_time: self.start_time,
            response_start_time: self.response_start_time,
            response_finish_time: self.response_finish_time,
            wait_time: self.wait_time(),
            response_time: self.response_time(),
            session_time: self.session_time(),
        }
    }
}
