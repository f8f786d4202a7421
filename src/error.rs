use reqwest::StatusCode;
use reqwest::header::InvalidHeaderValue;
use std::fmt;

/// Listing entry that does not satisfy the archive's filename grammar.
///
/// Carries the offending entry so callers can decide whether to drop it or
/// surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub entry: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid image filename: {}", self.entry)
    }
}

/// Unified error type for the archive client.
///
/// Wraps the various failure sources (arguments, decoding, HTTP, IO) into a
/// single enum for consistent error handling throughout the application.
#[derive(Debug)]
pub enum SdoError {
    /// Invalid command-line arguments or configuration.
    ArgNotValid(String),
    /// A filename did not decode into an [`crate::types::ImageRecord`].
    Decode(DecodeError),
    /// Non-success HTTP status while listing a directory.
    ListingStatus(StatusCode),
    /// Non-success HTTP status while fetching image bytes.
    DownloadStatus(StatusCode),
    /// Errors originating from the HTTP client (reqwest).
    Http(reqwest::Error),
    /// File system I/O errors around the cache directory.
    Io(std::io::Error),
    /// A directory level of the archive listed no entries.
    EmptyListing(String),
}

impl fmt::Display for SdoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdoError::ArgNotValid(msg) => write!(f, "invalid argument: {}", msg),
            SdoError::Decode(err) => write!(f, "{}", err),
            SdoError::ListingStatus(status) => {
                write!(f, "directory listing failed with status {}", status)
            }
            SdoError::DownloadStatus(status) => {
                write!(f, "image download failed with status {}", status)
            }
            SdoError::Http(e) => write!(f, "HTTP error: {}", e),
            SdoError::Io(e) => write!(f, "IO error: {}", e),
            SdoError::EmptyListing(msg) => write!(f, "empty directory listing: {}", msg),
        }
    }
}

impl From<DecodeError> for SdoError {
    fn from(err: DecodeError) -> Self {
        SdoError::Decode(err)
    }
}

impl From<InvalidHeaderValue> for SdoError {
    fn from(msg: InvalidHeaderValue) -> Self {
        SdoError::ArgNotValid(msg.to_string())
    }
}

impl From<reqwest::Error> for SdoError {
    fn from(err: reqwest::Error) -> Self {
        SdoError::Http(err)
    }
}

impl From<std::io::Error> for SdoError {
    fn from(err: std::io::Error) -> Self {
        SdoError::Io(err)
    }
}
