use std::collections::HashMap;

use crate::http::parser::ParseError;

const CRLF: &[u8] = b"\r\n";

/// Case-insensitive header table.
///
/// Keys are lower-cased before storage and lookup. Setting an existing key
/// overwrites the previous value; repeated headers are not merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(HashMap<String, String>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a header, replacing any existing value for the same name.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&key.to_ascii_lowercase()).map(|v| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes at most one header line from `data`.
    ///
    /// Returns `(bytes_consumed, done)`. A return of `(0, false)` means no
    /// complete line is available yet; the caller must keep its buffer and
    /// retry once more bytes arrive. `(2, true)` marks the empty line that
    /// terminates the header section.
    pub fn parse(&mut self, data: &[u8]) -> Result<(usize, bool), ParseError> {
        let Some(idx) = find_crlf(data) else {
            return Ok((0, false));
        };
        if idx == 0 {
            return Ok((2, true));
        }

        let line = &data[..idx];
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or_else(|| ParseError::MalformedHeader(String::from_utf8_lossy(line).into_owned()))?;
        let (raw_name, raw_value) = (&line[..colon], &line[colon + 1..]);

        // "Host : x" is malformed; leading/trailing whitespace around the
        // whole name is merely trimmed.
        if raw_name.last().is_some_and(|b| b.is_ascii_whitespace()) {
            return Err(ParseError::MalformedHeader(
                String::from_utf8_lossy(raw_name).into_owned(),
            ));
        }

        let name = raw_name.trim_ascii();
        if name.is_empty() {
            return Err(ParseError::MalformedHeader(
                String::from_utf8_lossy(line).into_owned(),
            ));
        }
        if let Some(&b) = name.iter().find(|&&b| !is_token_byte(b)) {
            return Err(ParseError::InvalidHeaderChar(b as char));
        }

        // The name is validated ASCII by now; the value passes through as-is.
        let name = String::from_utf8_lossy(name);
        let value = String::from_utf8_lossy(raw_value.trim_ascii());

        self.set(&name, value);
        Ok((idx + CRLF.len(), false))
    }
}

fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(2).position(|w| w == CRLF)
}

/// RFC 9110 tchar: the bytes allowed in a header field name.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}
