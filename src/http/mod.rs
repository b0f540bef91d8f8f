//! HTTP/1.1 protocol engine.
//!
//! The heart of this crate is an incremental request parser and an ordered
//! response writer, wired together by a per-connection handler. The parser
//! never blocks and never over-reads: it consumes whatever prefix of the
//! buffered bytes forms part of the current message and reports exactly how
//! much it took, so the transport can deliver one byte at a time or a whole
//! message at once with identical results.
//!
//! # Submodules
//!
//! - **`headers`**: case-insensitive header table with a one-line-at-a-time
//!   incremental parser
//! - **`parser`**: the request state machine (request line → headers → body)
//! - **`request`**: parsed request types
//! - **`response`**: status codes and the bare status-line write path
//! - **`writer`**: buffered write-once response writer
//! - **`connection`**: the read/feed/handle/flush cycle for one connection
//!
//! # Parser state machine
//!
//! ```text
//! Initialized ──request line──▶ ParsingHeaders ──blank line──▶ ParsingBody
//!                                      │                            │
//!                                      │ no Content-Length          │ exact
//!                                      └──────────▶ Done ◀──────────┘ count
//! ```
//!
//! Each connection serves exactly one request and is then closed; there is
//! no keep-alive.

pub mod connection;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
