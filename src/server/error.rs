//! Error types for the HTTP server.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::Error as ParserError;
use crate::server::response::{HttpResponse, StatusCode};

/// Errors that can occur while handling a connection.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing the request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error on the connection itself.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Requested file does not exist or cannot be read.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested file exists but may not be read.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Method other than GET or POST.
    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),

    /// The upload destination could not be opened or written.
    #[error("Failed to store upload at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request buffer could not be grown.
    #[error("Failed to grow request buffer to {capacity} bytes")]
    BufferGrowth { capacity: usize },
}

impl Error {
    /// The status to answer with, or `None` when the connection should be
    /// dropped without a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::ParseError(ParserError::InvalidMethod(_)) => Some(StatusCode::MethodNotAllowed),
            Error::ParseError(_) => Some(StatusCode::BadRequest),
            Error::NotFound(_) => Some(StatusCode::NotFound),
            Error::Forbidden(_) => Some(StatusCode::Forbidden),
            Error::MethodNotAllowed(_) => Some(StatusCode::MethodNotAllowed),
            Error::Storage { .. } => Some(StatusCode::InternalServerError),
            Error::IoError(_) | Error::BufferGrowth { .. } => None,
        }
    }

    /// Build the error response sent before closing the connection.
    ///
    /// The body is the reason phrase, except for multipart failures where it
    /// names the lookup that failed.
    pub fn to_response(&self) -> Option<HttpResponse> {
        let status = self.status()?;
        let response = match self {
            Error::ParseError(ParserError::Multipart(e)) => {
                HttpResponse::new(status).with_body_string(e.to_string())
            }
            _ => HttpResponse::error(status),
        };
        Some(response.with_content_type("text/plain"))
    }
}
