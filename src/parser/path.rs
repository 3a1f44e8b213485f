//! Mapping request targets onto paths below the content root.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::parser::error::Error;

/// Document served for a bare `/` target.
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// A relative path derived from a request target.
///
/// Never contains `..` and never starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedPath(String);

impl SanitizedPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join the path onto a content root.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl fmt::Display for SanitizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turn a raw request target into a path relative to the content root.
///
/// `/` becomes [`DEFAULT_DOCUMENT`]. Leading slashes are stripped. Any `..`
/// anywhere in what remains is rejected; this is a plain substring check, so
/// a file literally named `a..b` is refused as well.
///
/// ```
/// use filedrop::parser::sanitize_path;
///
/// assert_eq!(sanitize_path("/").unwrap().as_str(), "index.html");
/// assert_eq!(sanitize_path("/css/site.css").unwrap().as_str(), "css/site.css");
/// assert!(sanitize_path("/../etc/passwd").is_err());
/// ```
pub fn sanitize_path(target: &str) -> Result<SanitizedPath, Error> {
    let relative = if target == "/" {
        DEFAULT_DOCUMENT
    } else {
        target.trim_start_matches('/')
    };

    if relative.contains("..") {
        return Err(Error::PathTraversal(target.to_string()));
    }

    Ok(SanitizedPath(relative.to_string()))
}
