//! The request methods this server answers.

use std::fmt;
use std::str::FromStr;

use crate::parser::error::Error;

/// A method the server has a handler for.
///
/// Any other token, including lowercase spellings of these two, fails to
/// parse with [`Error::InvalidMethod`] and is answered with
/// `405 Method Not Allowed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Serve a file from the content root.
    GET,
    /// Store the request body at the upload path.
    POST,
}

impl Method {
    /// The token as it appears on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            other => Err(Error::InvalidMethod(other.to_owned())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
