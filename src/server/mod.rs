//! HTTP server implementation.
//!
//! One task per accepted connection: read the request, serve a file or
//! store an upload, write the response, close.

mod response;
mod config;
mod error;
mod handler;
mod http_server;
mod mime;
mod reader;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::ServerConfig;
pub use error::Error;
pub use handler::{handle_request, receive_upload, serve_file, RAW_UPLOAD_ACK};
pub use http_server::HttpServer;
pub use mime::{content_type_for, DEFAULT_CONTENT_TYPE};
pub use reader::{read_request, RequestBuffer};
