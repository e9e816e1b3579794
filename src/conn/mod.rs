//! Connection timing state.
//!
//! - **`connection`**: one connection's headers and lifecycle timestamps, with
//!   the reconciliation rules that keep them ordered
//! - **`registry`**: get-or-create store keyed by id and grouped by channel
//! - **`shared`**: lock-guarded registry handle for multi-producer hosts
//! - **`event`**: batch event records
//! - **`snapshot`**: serializable timing snapshot
//!
//! # Timestamp reconciliation
//!
//! Timestamps arrive in any order and may be corrected later. The setters
//! keep `start <= response_start <= response_finish` at all times:
//!
//! ```text
//!   set_start_time(t)           t > response_start  → all three collapse to t
//!   set_response_start_time(t)  start unset         → start anchored to t
//!                               t < start           → clamped up to start
//!                               t > response_finish → finish dragged to t
//!   set_response_finish_time(t) response_start unset → both anchored to t
//!                               t < response_start  → clamped up
//! ```
//!
//! # Example
//!
//! ```
//! use waterfall::conn::registry::ConnectionRegistry;
//!
//! let mut registry = ConnectionRegistry::new();
//! registry.set_response_finish_time(1, 400);
//! registry.set_start_time(1, 100);
//! registry.set_response_start_time(1, 150);
//!
//! let conn = registry.get(1).unwrap();
//! assert_eq!(conn.wait_time(), Some(50));
//! assert_eq!(conn.response_time(), Some(250));
//! ```

pub mod connection;
pub mod event;
pub mod registry;
pub mod shared;
pub mod snapshot;

pub use connection::{Connection, ConnectionId, Millis};
pub use event::ConnectionEvent;
pub use registry::ConnectionRegistry;
pub use shared::SharedRegistry;
pub use snapshot::ConnectionSnapshot;
