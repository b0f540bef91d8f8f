//! httpwire - HTTP/1.1 from raw TCP
//!
//! Incremental request parsing and ordered response writing over a byte
//! stream, plus the per-connection server loop.

pub mod config;
pub mod http;
pub mod server;
