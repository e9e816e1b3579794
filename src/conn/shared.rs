//! Registry handle for hosts with several event producers.
//!
//! Every ingest runs under the write lock, so a connection's setter sequence
//! is never interleaved with another producer's and two producers racing on
//! a new id end up sharing one connection. Methods hand back owned snapshots
//! so callers render after the lock is released.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::conn::connection::{ConnectionId, Millis};
use crate::conn::event::ConnectionEvent;
use crate::conn::registry::ConnectionRegistry;
use crate::conn::snapshot::ConnectionSnapshot;
use crate::render::RenderUpdate;

#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<ConnectionRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a batch of events, returning one update per event.
    ///
    /// Offsets are taken against the origin left by the whole batch.
    pub async fn apply_batch(&self, events: &[ConnectionEvent]) -> Vec<RenderUpdate> {
        let mut registry = self.inner.write().await;

        let updates: Vec<RenderUpdate> = events
            .iter()
            .map(|event| RenderUpdate::from(registry.apply_event(event)))
            .collect();

        let origin = registry.earliest_start();
        updates.into_iter().map(|update| update.with_origin(origin)).collect()
    }

    pub async fn set_request_header(&self, id: ConnectionId, raw: &str) -> RenderUpdate {
        let mut registry = self.inner.write().await;
        let update = RenderUpdate::from(registry.set_request_header(id, raw));
        update.with_origin(registry.earliest_start())
    }

    pub async fn set_response_header(&self, id: ConnectionId, raw: &str) -> RenderUpdate {
        let mut registry = self.inner.write().await;
        let update = RenderUpdate::from(registry.set_response_header(id, raw));
        update.with_origin(registry.earliest_start())
    }

    pub async fn set_start_time(&self, id: ConnectionId, time: Millis) -> RenderUpdate {
        let mut registry = self.inner.write().await;
        let update = RenderUpdate::from(registry.set_start_time(id, time));
        update.with_origin(registry.earliest_start())
    }

    pub async fn set_response_start_time(&self, id: ConnectionId, time: Millis) -> RenderUpdate {
        let mut registry = self.inner.write().await;
        let update = RenderUpdate::from(registry.set_response_start_time(id, time));
        update.with_origin(registry.earliest_start())
    }

    pub async fn set_response_finish_time(&self, id: ConnectionId, time: Millis) -> RenderUpdate {
        let mut registry = self.inner.write().await;
        let update = RenderUpdate::from(registry.set_response_finish_time(id, time));
        update.with_origin(registry.earliest_start())
    }

    /// Read-only lookup; never creates.
    pub async fn snapshot(&self, id: ConnectionId) -> Option<ConnectionSnapshot> {
        self.inner.read().await.snapshot(id)
    }

    /// Read-only lookup of a full render update; never creates.
    pub async fn view(&self, id: ConnectionId) -> Option<RenderUpdate> {
        let registry = self.inner.read().await;
        let origin = registry.earliest_start();

        registry.get(id).map(|conn| RenderUpdate::from(conn).with_origin(origin))
    }

    /// Waterfall origin: the earliest defined start time.
    pub async fn earliest_start(&self) -> Option<Millis> {
        self.inner.read().await.earliest_start()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Channel ids and their connection ids, in display order.
    pub async fn groups(&self) -> Vec<(Option<String>, Vec<ConnectionId>)> {
        let registry = self.inner.read().await;

        registry
            .channels()
            .map(|channel| {
                let ids: Vec<ConnectionId> = registry.channel(channel).iter().map(|c| c.id()).collect();
                (channel.map(str::to_string), ids)
            })
            .collect()
    }
}
