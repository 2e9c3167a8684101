// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors outside of metadata reading.
///
/// Per-file read outcomes are carried by
/// [`ReadError`](crate::application::port::ReadError) and rendered as
/// reports; this type covers the surrounding plumbing.
#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Output(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Output(e) => write!(f, "Output Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Output(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
