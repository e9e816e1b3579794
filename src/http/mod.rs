//! HTTP header block parsing.
//!
//! The instrumentation source hands over raw header blocks as text. This
//! module turns them into structured records without judging HTTP semantics:
//! a method, version or status is recorded as written.
//!
//! - **`parser`**: splits a block into start-line and fields and classifies it
//! - **`request`**: the request-header record
//! - **`response`**: the response-header record
//! - **`uri`**: splits a request-target into host, path and display file
//!
//! # Example
//!
//! ```
//! use waterfall::http::parser::{parse_block, HeaderBlock};
//!
//! let block = parse_block("HTTP/1.1 404 Not Found\r\n\r\n").unwrap();
//! match block {
//!     HeaderBlock::Response(resp) => assert_eq!(resp.status, Some(404)),
//!     HeaderBlock::Request(_) => unreachable!(),
//! }
//! ```

pub mod parser;
pub mod request;
pub mod response;
pub mod uri;
