use crate::http::headers::Headers;

/// The first line of an HTTP request.
///
/// The target is kept as an opaque string; it is not validated as a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// The HTTP method token, e.g. "GET"
    pub method: String,
    /// The request target, e.g. "/index.html"
    pub target: String,
    /// The HTTP version without its "HTTP/" prefix, e.g. "1.1"
    pub version: String,
}

/// A fully parsed HTTP request.
///
/// Built exclusively by [`RequestParser`](crate::http::parser::RequestParser);
/// read-only once parsing is done.
#[derive(Debug, Clone)]
pub struct Request {
    pub request_line: RequestLine,
    pub headers: Headers,
    /// Request body, empty unless a positive Content-Length was declared
    pub body: Vec<u8>,
}

impl Request {
    /// Retrieves a header value by name (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// The declared Content-Length, or 0 if the header is missing or invalid.
    pub fn content_length(&self) -> usize {
        self.header("content-length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}
