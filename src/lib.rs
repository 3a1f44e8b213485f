//! A small HTTP file server that serves static files and accepts uploads.
//!
//! The server reads one HTTP/1.x request per connection, answers it and
//! closes the connection. Two methods are supported:
//!
//! - `GET` serves a file below the content root (`/` serves `index.html`).
//!   Targets containing `..` are rejected.
//! - `POST` stores an upload at a fixed path. A `multipart/form-data` body
//!   has the payload of its first part extracted; any other body is stored
//!   as-is, up to its Content-Length.
//!
//! Each connection is handled by its own task; there is no keep-alive,
//! chunked encoding or TLS.
//!
//! # Examples
//!
//! ## Parsing a request line
//!
//! ```
//! use filedrop::{parse_request, sanitize_path};
//!
//! let request = parse_request(b"GET /img/logo.png HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();
//! let path = sanitize_path(&request.target).unwrap();
//!
//! assert_eq!(path.as_str(), "img/logo.png");
//! ```
//!
//! ## Running the server
//!
//! ```no_run
//! use filedrop::{HttpServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), filedrop::ServerError> {
//!     HttpServer::new(ServerConfig::default()).start().await
//! }
//! ```

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, Method, ParsedRequest, parse_request, sanitize_path};
pub use server::{Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};
