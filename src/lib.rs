//! Waterfall - HTTP connection timing recorder
//!
//! Core library for reconciling connection timestamps and parsing header
//! blocks reported by an instrumentation source.

pub mod config;
pub mod conn;
pub mod feed;
pub mod http;
pub mod render;
