//! Per-session store of connections.
//!
//! Connections are looked up by id and grouped by channel. Only ingest
//! operations create connections; queries report unknown ids as `None`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::conn::connection::{Connection, ConnectionId, Millis};
use crate::conn::event::ConnectionEvent;
use crate::conn::snapshot::ConnectionSnapshot;

/// Keyed store of every connection seen in a session.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    by_id: HashMap<ConnectionId, Connection>,
    /// Channel → connection ids in the order they were first seen.
    by_channel: HashMap<Option<String>, Vec<ConnectionId>>,
    /// Channel keys by first appearance.
    channel_order: Vec<Option<String>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the connection for `id`, creating it on first reference.
    ///
    /// The channel only matters on creation: a known id keeps the channel it
    /// was created with, whatever `channel_id` says now.
    pub fn get_or_create(&mut self, id: ConnectionId, channel_id: Option<&str>) -> &mut Connection {
        match self.by_id.entry(id) {
            Entry::Occupied(entry) => {
                let conn = entry.into_mut();
                if let Some(requested) = channel_id {
                    if conn.channel_id() != Some(requested) {
                        tracing::trace!(conn = id, requested, "Ignoring channel of known connection");
                    }
                }
                conn
            }
            Entry::Vacant(entry) => {
                let channel = channel_id.map(str::to_string);

                tracing::debug!(conn = id, channel = ?channel, "New connection");

                match self.by_channel.get_mut(&channel) {
                    Some(bucket) => bucket.push(id),
                    None => {
                        self.channel_order.push(channel.clone());
                        self.by_channel.insert(channel.clone(), vec![id]);
                    }
                }

                entry.insert(Connection::new(id, channel))
            }
        }
    }

    /// Applies one batch event and returns the updated connection.
    ///
    /// Raw header blocks take precedence over the structured header fields.
    /// Timestamps are applied start first, then response start, then
    /// response finish, each only when present.
    pub fn apply_event(&mut self, event: &ConnectionEvent) -> &Connection {
        let conn = self.get_or_create(event.id, event.channel_id.as_deref());

        if event.request_header.is_some() || event.response_header.is_some() {
            if let Some(raw) = &event.request_header {
                conn.set_request_header(raw);
            }
            if let Some(raw) = &event.response_header {
                conn.set_response_header(raw);
            }
        } else if event.has_summary() {
            let (request, response) = event.summary_headers();
            conn.set_headers(request, response);
        }

        if let Some(t) = event.start_time {
            conn.set_start_time(t);
        }
        if let Some(t) = event.response_start_time {
            conn.set_response_start_time(t);
        }
        if let Some(t) = event.response_finish_time {
            conn.set_response_finish_time(t);
        }

        conn
    }

    /// Applies events in order, returning a snapshot after each.
    pub fn apply_batch<'a, I>(&mut self, events: I) -> Vec<ConnectionSnapshot>
    where
        I: IntoIterator<Item = &'a ConnectionEvent>,
    {
        events
            .into_iter()
            .map(|event| self.apply_event(event).snapshot())
            .collect()
    }

    pub fn set_request_header(&mut self, id: ConnectionId, raw: &str) -> &Connection {
        self.get_or_create(id, None).set_request_header(raw)
    }

    pub fn set_response_header(&mut self, id: ConnectionId, raw: &str) -> &Connection {
        self.get_or_create(id, None).set_response_header(raw)
    }

    pub fn set_start_time(&mut self, id: ConnectionId, time: Millis) -> &Connection {
        self.get_or_create(id, None).set_start_time(time)
    }

    pub fn set_response_start_time(&mut self, id: ConnectionId, time: Millis) -> &Connection {
        self.get_or_create(id, None).set_response_start_time(time)
    }

    pub fn set_response_finish_time(&mut self, id: ConnectionId, time: Millis) -> &Connection {
        self.get_or_create(id, None).set_response_finish_time(time)
    }

    /// Looks up a connection without creating it.
    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.by_id.get(&id)
    }

    pub fn snapshot(&self, id: ConnectionId) -> Option<ConnectionSnapshot> {
        self.get(id).map(Connection::snapshot)
    }

    /// Connections of one channel in display order.
    pub fn channel(&self, channel_id: Option<&str>) -> Vec<&Connection> {
        let key = channel_id.map(str::to_string);

        self.by_channel
            .get(&key)
            .into_iter()
            .flatten()
            .filter_map(|id| self.by_id.get(id))
            .collect()
    }

    /// Channels in the order they were first seen.
    pub fn channels(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.channel_order.iter().map(|c| c.as_deref())
    }

    /// Earliest recorded start time, the origin of the waterfall.
    pub fn earliest_start(&self) -> Option<Millis> {
        self.by_id
            .values()
            .filter_map(Connection::start_time)
            .min()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
