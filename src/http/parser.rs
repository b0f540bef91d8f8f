use thiserror::Error;

use crate::http::headers::Headers;
use crate::http::request::{Request, RequestLine};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
    #[error("unsupported HTTP version: {0:?}")]
    UnsupportedVersion(String),
    #[error("malformed header: {0:?}")]
    MalformedHeader(String),
    #[error("invalid character in header name: {0:?}")]
    InvalidHeaderChar(char),
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    Initialized,
    ParsingHeaders,
    ParsingBody,
    Done,
}

/// Incremental HTTP/1.1 request parser.
///
/// The parser holds no I/O: the caller owns the read buffer, feeds it
/// whatever bytes have arrived, and discards the prefix `parse` reports as
/// consumed. Partial input is never an error; `parse` simply stops consuming
/// and picks up where it left off on the next call.
pub struct RequestParser {
    state: ParserState,
    request_line: Option<RequestLine>,
    headers: Headers,
    body: Vec<u8>,
    content_length: usize,
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Initialized,
            request_line: None,
            headers: Headers::new(),
            body: Vec::new(),
            content_length: 0,
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParserState::Done
    }

    /// Consumes as much of `data` as the current message needs.
    ///
    /// Returns the number of bytes consumed across all internal state
    /// transitions. Zero means more input is required (unless the parser is
    /// already done). Errors are fatal; the parser must be discarded.
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        let mut consumed = 0;
        while self.state != ParserState::Done {
            let n = self.parse_single(&data[consumed..])?;
            if n == 0 {
                break;
            }
            consumed += n;
        }
        Ok(consumed)
    }

    /// Yields the completed request, or `None` if parsing has not finished.
    pub fn into_request(self) -> Option<Request> {
        if self.state != ParserState::Done {
            return None;
        }
        Some(Request {
            request_line: self.request_line?,
            headers: self.headers,
            body: self.body,
        })
    }

    fn parse_single(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        match self.state {
            ParserState::Initialized => {
                let Some(idx) = find_crlf(data) else {
                    return Ok(0);
                };
                self.request_line = Some(parse_request_line(&data[..idx])?);
                self.state = ParserState::ParsingHeaders;
                Ok(idx + 2)
            }

            ParserState::ParsingHeaders => {
                let (n, done) = self.headers.parse(data)?;
                if done {
                    self.state = match self.declared_content_length()? {
                        0 => ParserState::Done,
                        len => {
                            self.content_length = len;
                            ParserState::ParsingBody
                        }
                    };
                }
                Ok(n)
            }

            ParserState::ParsingBody => {
                let remaining = self.content_length - self.body.len();
                let take = remaining.min(data.len());
                self.body.extend_from_slice(&data[..take]);
                if self.body.len() == self.content_length {
                    self.state = ParserState::Done;
                }
                Ok(take)
            }

            ParserState::Done => Ok(0),
        }
    }

    fn declared_content_length(&self) -> Result<usize, ParseError> {
        match self.headers.get("content-length") {
            None => Ok(0),
            Some(v) => v
                .parse()
                .map_err(|_| ParseError::InvalidContentLength(v.to_string())),
        }
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(2).position(|w| w == b"\r\n")
}

fn parse_request_line(line: &[u8]) -> Result<RequestLine, ParseError> {
    let malformed = || ParseError::MalformedRequestLine(String::from_utf8_lossy(line).into_owned());

    let line = std::str::from_utf8(line).map_err(|_| malformed())?;
    let mut parts = line.split(' ');
    let (method, target, version) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(m), Some(t), Some(v), None) => (m, t, v),
        _ => return Err(malformed()),
    };

    if method.is_empty() || !method.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(malformed());
    }
    let version = version.strip_prefix("HTTP/").ok_or_else(malformed)?;
    if version != "1.1" {
        return Err(ParseError::UnsupportedVersion(version.to_string()));
    }

    Ok(RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        version: version.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_get_without_body() {
        let mut parser = RequestParser::new();
        let data = b"GET /path HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let consumed = parser.parse(data).unwrap();
        assert_eq!(consumed, data.len());
        assert!(parser.is_done());

        let req = parser.into_request().unwrap();
        assert_eq!(req.request_line.method, "GET");
        assert_eq!(req.request_line.target, "/path");
        assert_eq!(req.request_line.version, "1.1");
        assert!(req.body.is_empty());
    }

    #[test]
    fn incomplete_request_line_consumes_nothing() {
        let mut parser = RequestParser::new();
        let consumed = parser.parse(b"GET /path HT").unwrap();

        assert_eq!(consumed, 0);
        assert_eq!(parser.state(), ParserState::Initialized);
    }

    #[test]
    fn lowercase_method_is_rejected() {
        let mut parser = RequestParser::new();
        let err = parser.parse(b"get / HTTP/1.1\r\n");

        assert!(matches!(err, Err(ParseError::MalformedRequestLine(_))));
    }

    #[test]
    fn wrong_token_count_is_rejected() {
        let mut parser = RequestParser::new();
        let err = parser.parse(b"/path HTTP/1.1\r\n");

        assert!(matches!(err, Err(ParseError::MalformedRequestLine(_))));
    }

    #[test]
    fn old_version_is_rejected() {
        let mut parser = RequestParser::new();
        let err = parser.parse(b"GET / HTTP/1.0\r\n");

        assert!(matches!(err, Err(ParseError::UnsupportedVersion(_))));
    }
}
