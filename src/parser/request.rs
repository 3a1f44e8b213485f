//! Request-line parsing and header lookup.
//!
//! Only the request line is tokenized. The few headers the server cares
//! about (`Content-Length`, `Content-Type`) are located by searching the
//! header block rather than by building a header map.

use crate::parser::error::Error;
use crate::parser::method::Method;

/// The four-byte sequence ending an HTTP header block.
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// A request whose request line has been split into its three tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// The method token as sent by the client
    pub method: String,
    /// The raw request target, not yet sanitized
    pub target: String,
    /// The protocol token (e.g. `HTTP/1.1`)
    pub version: String,
    /// The declared Content-Length, if present and numeric
    pub content_length: Option<usize>,
    /// The Content-Type header value, if present
    pub content_type: Option<String>,
    /// Offset of the first body byte in the buffer the request was parsed from.
    /// Only set when a positive Content-Length was declared and the header
    /// terminator is present.
    pub body_offset: Option<usize>,
}

impl ParsedRequest {
    /// Interpret the method token.
    pub fn method(&self) -> Result<Method, Error> {
        self.method.parse()
    }

    /// The declared body length, treating an absent header as zero.
    pub fn declared_length(&self) -> usize {
        self.content_length.unwrap_or(0)
    }
}

/// Parse the request line of a buffered request.
///
/// Method and target are space-separated tokens; the protocol version is the
/// rest of the line up to the carriage return. Tabs are not separators.
/// Anything after the first line is ignored here apart from the
/// Content-Length and Content-Type lookups.
///
/// # Examples
///
/// ```
/// use filedrop::parser::parse_request;
///
/// let request = parse_request(b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();
///
/// assert_eq!(request.method, "GET");
/// assert_eq!(request.target, "/index.html");
/// assert_eq!(request.version, "HTTP/1.1");
/// assert_eq!(request.body_offset, None);
/// ```
pub fn parse_request(input: &[u8]) -> Result<ParsedRequest, Error> {
    let line_end = input
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(input.len());
    let line = String::from_utf8_lossy(&input[..line_end]);
    let request_line = line.split('\r').next().unwrap_or_default();

    let malformed = || Error::MalformedRequestLine(request_line.to_string());
    let (method, rest) = next_token(request_line).ok_or_else(malformed)?;
    let (target, rest) = next_token(rest).ok_or_else(malformed)?;
    let version = rest.trim_start_matches(' ');
    if version.is_empty() {
        return Err(malformed());
    }

    let content_length = content_length(input);
    let body_offset = if content_length.unwrap_or(0) > 0 {
        find_header_end(input)
    } else {
        None
    };

    Ok(ParsedRequest {
        method: method.to_string(),
        target: target.to_string(),
        version: version.to_string(),
        content_length,
        content_type: header_value(input, "Content-Type"),
        body_offset,
    })
}

/// Split off the next space-delimited token, skipping leading spaces.
fn next_token(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_start_matches(' ');
    if line.is_empty() {
        return None;
    }
    Some(line.split_once(' ').unwrap_or((line, "")))
}

/// Offset just past the first header terminator in `buf`.
pub fn find_header_end(buf: &[u8]) -> Option<usize> {
    find_subsequence(buf, HEADER_TERMINATOR).map(|pos| pos + HEADER_TERMINATOR.len())
}

/// Look up a header by name (case-insensitive) in the header block of `buf`.
pub fn header_value(buf: &[u8], name: &str) -> Option<String> {
    let head = match find_header_end(buf) {
        Some(end) => &buf[..end],
        None => buf,
    };

    String::from_utf8_lossy(head)
        .split("\r\n")
        .skip(1)
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
}

/// The Content-Length header of `buf`, if present and a valid number.
pub fn content_length(buf: &[u8]) -> Option<usize> {
    header_value(buf, "Content-Length").and_then(|v| v.parse().ok())
}

pub(crate) fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
