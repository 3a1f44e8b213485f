//! Content-Type lookup by file extension.

use std::path::Path;

/// Fallback for unknown or missing extensions.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Resolve the Content-Type for a file from its extension.
///
/// Extensions are matched case-sensitively.
pub fn content_type_for(path: impl AsRef<Path>) -> &'static str {
    match path.as_ref().extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("css") => "text/css",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
