use std::collections::HashMap;

use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{status_line, StatusCode};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WriteError {
    #[error("{0} already set")]
    AlreadySet(&'static str),
    #[error("{0} written out of order")]
    OutOfOrder(&'static str),
}

/// Progress through the one-way status → headers → body sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Empty,
    StatusSet,
    HeadersSet,
    BodySet,
}

/// Buffered HTTP/1.1 response writer.
///
/// Status line, headers, and body must each be written exactly once, in that
/// order; nothing reaches the transport until [`flush`](Self::flush). One
/// writer serves one request/response cycle.
pub struct ResponseWriter {
    state: WriterState,
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self {
            state: WriterState::Empty,
            status: StatusCode::OK,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Records the status code. Must be the first write.
    pub fn write_status_line(&mut self, status: StatusCode) -> Result<(), WriteError> {
        match self.state {
            WriterState::Empty => {
                self.status = status;
                self.state = WriterState::StatusSet;
                Ok(())
            }
            _ => Err(WriteError::AlreadySet("status line")),
        }
    }

    /// Records the full header mapping. Requires the status line to be set.
    pub fn write_headers(&mut self, headers: HashMap<String, String>) -> Result<(), WriteError> {
        match self.state {
            WriterState::Empty => Err(WriteError::OutOfOrder("headers")),
            WriterState::StatusSet => {
                self.headers = headers;
                self.state = WriterState::HeadersSet;
                Ok(())
            }
            _ => Err(WriteError::AlreadySet("headers")),
        }
    }

    /// Copies `body` into the writer and returns the number of bytes taken.
    /// Requires status line and headers to be set.
    pub fn write_body(&mut self, body: &[u8]) -> Result<usize, WriteError> {
        match self.state {
            WriterState::Empty | WriterState::StatusSet => Err(WriteError::OutOfOrder("body")),
            WriterState::HeadersSet => {
                self.body = body.to_vec();
                self.state = WriterState::BodySet;
                Ok(body.len())
            }
            WriterState::BodySet => Err(WriteError::AlreadySet("body")),
        }
    }

    /// Serializes the buffered response to `to`: status line, header lines,
    /// blank-line terminator, then the body.
    ///
    /// The first failed write aborts the flush; whatever already reached the
    /// transport stays there.
    pub async fn flush<W>(&self, to: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        to.write_all(status_line(self.status).as_bytes()).await?;

        for (k, v) in &self.headers {
            to.write_all(k.as_bytes()).await?;
            to.write_all(b": ").await?;
            to.write_all(v.as_bytes()).await?;
            to.write_all(b"\r\n").await?;
        }

        to.write_all(b"\r\n").await?;

        if !self.body.is_empty() {
            to.write_all(&self.body).await?;
        }

        Ok(())
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_must_follow_the_order() {
        let mut w = ResponseWriter::new();
        assert_eq!(
            w.write_headers(HashMap::new()),
            Err(WriteError::OutOfOrder("headers"))
        );
        assert_eq!(w.write_body(b"x"), Err(WriteError::OutOfOrder("body")));

        w.write_status_line(StatusCode::OK).unwrap();
        assert_eq!(w.write_body(b"x"), Err(WriteError::OutOfOrder("body")));
    }

    #[test]
    fn each_section_is_write_once() {
        let mut w = ResponseWriter::new();
        w.write_status_line(StatusCode::OK).unwrap();
        assert_eq!(
            w.write_status_line(StatusCode::BAD_REQUEST),
            Err(WriteError::AlreadySet("status line"))
        );

        w.write_headers(HashMap::new()).unwrap();
        assert_eq!(
            w.write_headers(HashMap::new()),
            Err(WriteError::AlreadySet("headers"))
        );

        assert_eq!(w.write_body(b"first"), Ok(5));
        assert_eq!(w.write_body(b"second"), Err(WriteError::AlreadySet("body")));
        assert_eq!(w.body, b"first");
    }
}
