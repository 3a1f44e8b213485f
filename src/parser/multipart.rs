//! Locating an uploaded file inside a `multipart/form-data` body.
//!
//! The boundary is treated as a literal search delimiter. Only the first
//! part is looked at: its payload runs from the end of the part's header
//! block up to the CRLF preceding the next `--boundary` line.

use std::ops::Range;

use crate::parser::error::MultipartError;
use crate::parser::request::{find_header_end, find_subsequence};

/// The only multipart subtype accepted for uploads.
pub const FORM_DATA: &str = "multipart/form-data";

const BOUNDARY_PARAM: &str = "boundary=";

/// Whether a Content-Type value selects multipart handling.
pub fn is_multipart(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("multipart/")
}

/// Extract the `boundary=` parameter from a Content-Type value.
///
/// Everything after `boundary=` up to the end of the line is the boundary.
///
/// ```
/// use filedrop::parser::extract_boundary;
///
/// let boundary = extract_boundary("multipart/form-data; boundary=----xyz").unwrap();
/// assert_eq!(boundary, "----xyz");
/// ```
pub fn extract_boundary(content_type: &str) -> Result<&str, MultipartError> {
    if !content_type.to_ascii_lowercase().contains(FORM_DATA) {
        return Err(MultipartError::NotFormData);
    }

    let start = content_type
        .find(BOUNDARY_PARAM)
        .ok_or(MultipartError::MissingBoundary)?
        + BOUNDARY_PARAM.len();

    let boundary = content_type[start..]
        .split("\r\n")
        .next()
        .unwrap_or_default()
        .trim();

    if boundary.is_empty() {
        return Err(MultipartError::MissingBoundary);
    }
    Ok(boundary)
}

/// Find the byte range of the first part's payload within `body`.
pub fn locate_payload(body: &[u8], boundary: &str) -> Result<Range<usize>, MultipartError> {
    let start = find_header_end(body).ok_or(MultipartError::MissingPartHeaders)?;

    let delimiter = [b"\r\n--".as_slice(), boundary.as_bytes()].concat();
    let end = find_subsequence(&body[start..], &delimiter)
        .map(|pos| start + pos)
        .ok_or(MultipartError::MissingClosingBoundary)?;

    Ok(start..end)
}
