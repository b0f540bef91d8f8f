use std::collections::HashMap;

use bytes::{Buf, BytesMut};
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tracing::warn;

use crate::http::parser::{ParseError, ParserState, RequestParser};
use crate::http::request::Request;
use crate::http::response::{self, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::server::{Handler, HandlerError};

#[derive(Debug, Error)]
enum ReadError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("connection closed mid-request")]
    UnexpectedEof,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A single accepted connection, serving exactly one request/response cycle.
pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    handler: Handler,
}

impl Connection {
    pub fn new(stream: TcpStream, handler: Handler) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            handler,
        }
    }

    /// Reads and parses one request, runs the handler, flushes the response,
    /// and lets the connection drop closed. No keep-alive.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let request = match self.read_request().await {
            Ok(Some(request)) => request,
            // Peer connected and closed without sending anything
            Ok(None) => return Ok(()),
            Err(ReadError::Parse(e)) => {
                // Best-effort rejection; the read side is already unusable.
                let _ =
                    response::write_status_line(&mut self.stream, StatusCode::BAD_REQUEST).await;
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        let mut writer = ResponseWriter::new();
        if let Err(e) = (self.handler)(&mut writer, &request) {
            warn!(
                "Handler failed for {}: {}",
                request.request_line.target, e.message
            );
            writer = fallback_response(&e);
        }

        writer.flush(&mut self.stream).await?;
        Ok(())
    }

    /// Feeds transport bytes to a fresh parser until the message is complete.
    ///
    /// Returns `Ok(None)` if the peer closed the stream before sending any
    /// part of a request.
    async fn read_request(&mut self) -> Result<Option<Request>, ReadError> {
        let mut parser = RequestParser::new();

        loop {
            let consumed = parser.parse(&self.buffer)?;
            self.buffer.advance(consumed);

            if parser.is_done() {
                return Ok(parser.into_request());
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;
            if n == 0 {
                if parser.state() == ParserState::Initialized && self.buffer.is_empty() {
                    return Ok(None);
                }
                return Err(ReadError::UnexpectedEof);
            }
        }
    }
}

/// Replacement response for a failed handler, built on a fresh writer.
fn fallback_response(err: &HandlerError) -> ResponseWriter {
    let body = err.message.as_bytes();
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "text/plain".to_string());
    headers.insert("Content-Length".to_string(), body.len().to_string());

    // Fresh writer, calls in order: these cannot fail.
    let mut w = ResponseWriter::new();
    let _ = w.write_status_line(err.status);
    let _ = w.write_headers(headers);
    let _ = w.write_body(body);
    w
}
