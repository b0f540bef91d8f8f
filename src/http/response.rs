use tokio::io::{AsyncWrite, AsyncWriteExt};

const HTTP_VERSION: &str = "HTTP/1.1";

/// An HTTP response status code.
///
/// Any u16 is representable; codes without a canonical reason phrase
/// serialize with an empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The canonical reason phrase, or "" for codes this server doesn't know.
    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            400 => "Bad Request",
            500 => "Internal Server Error",
            _ => "",
        }
    }
}

/// Formats the status line for `status`, CRLF included.
pub fn status_line(status: StatusCode) -> String {
    format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    )
}

/// Writes a bare status line to `w`, bypassing the ordered
/// [`ResponseWriter`](crate::http::writer::ResponseWriter) lifecycle.
///
/// Used for minimal early responses, e.g. rejecting an unparseable request.
pub async fn write_status_line<W>(w: &mut W, status: StatusCode) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    w.write_all(status_line(status).as_bytes()).await
}
