//! Error types for deletetweets

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Twitter API credentials not set: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Failed to parse archive: {0}")]
    ArchiveParse(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Twitter API error: {0}")]
    TwitterError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected API response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Only provider-reported failures on a single record are survivable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::TwitterError(_))
    }
}
