//! Request parsing.
//!
//! Everything in this module works on bytes already read off the wire; none
//! of it performs I/O.

mod request;
mod method;
mod path;
mod multipart;
mod error;
mod tests;

// Re-export public items
pub use request::{ParsedRequest, HEADER_TERMINATOR};
pub use method::Method;
pub use path::{SanitizedPath, DEFAULT_DOCUMENT};
pub use error::{Error, MultipartError};

// Re-export the parsing functions
pub use request::{content_length, find_header_end, header_value, parse_request};
pub use path::sanitize_path;
pub use multipart::{extract_boundary, is_multipart, locate_payload, FORM_DATA};
