//! Server-side glue: the application handler contract and the accept loop.

pub mod listener;

use std::sync::Arc;

use crate::http::request::Request;
use crate::http::response::StatusCode;
use crate::http::writer::{ResponseWriter, WriteError};

/// Application-level failure reported by a handler.
///
/// The server answers with `status` and `message` on a fresh writer,
/// regardless of what the handler already wrote.
#[derive(Debug, Clone)]
pub struct HandlerError {
    pub status: StatusCode,
    pub message: String,
}

impl HandlerError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<WriteError> for HandlerError {
    /// Writer misuse is a programming error; surface it as a generic 500.
    fn from(err: WriteError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

/// Per-request application callback.
///
/// Given a completed request, the handler must call `write_status_line`,
/// `write_headers`, then `write_body` on the writer, at most once each,
/// before returning.
pub type Handler =
    Arc<dyn Fn(&mut ResponseWriter, &Request) -> Result<(), HandlerError> + Send + Sync>;
