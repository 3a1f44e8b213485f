//! Error types for request parsing.

use thiserror::Error;

/// Errors that can occur while parsing a buffered request.
#[derive(Debug, Error)]
pub enum Error {
    /// The method token is not one the server knows about.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The request line is missing the method, target or protocol token.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The peer closed the connection before the header terminator arrived.
    #[error("Connection closed before the end of the header block")]
    IncompleteHeaders,

    /// The target contains a `..` sequence.
    #[error("Path traversal rejected: {0}")]
    PathTraversal(String),

    /// The multipart body could not be taken apart.
    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
}

/// The lookup that failed while locating an uploaded file inside a
/// `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MultipartError {
    /// Content-Type names a multipart type other than `multipart/form-data`.
    #[error("Content-Type is not multipart/form-data")]
    NotFormData,

    /// No usable `boundary=` parameter in the Content-Type header.
    #[error("Missing boundary in Content-Type")]
    MissingBoundary,

    /// The part's own header block never ends.
    #[error("Missing part header terminator")]
    MissingPartHeaders,

    /// The boundary does not recur after the payload.
    #[error("Missing closing boundary")]
    MissingClosingBoundary,
}
