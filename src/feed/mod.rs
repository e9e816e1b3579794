//! JSON-lines event feed used by the `waterfall` binary.
//!
//! The core does not own a transport; this is one host-side way of
//! delivering events to it.

pub mod message;
pub mod reader;

pub use message::FeedMessage;
pub use reader::{process, run, FeedStats};
