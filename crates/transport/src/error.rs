//! Error types for the transport layer.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed cause of a network failure (a `reqwest` error or an expired timeout).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while dispatching or reading a resource locator.
///
/// Every variant carries the locator it was raised for. Nothing here is
/// retried or recovered inside the crate.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The locator is not a syntactically valid URI.
    #[error("Invalid URI '{uri}': {source}")]
    Parse {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    /// The locator parsed, but no transport handles its scheme.
    #[error("Unsupported URI scheme '{scheme}' in '{uri}'")]
    UnsupportedScheme { scheme: String, uri: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, DNS or TLS failure, or the configured timeout expired.
    #[error("Failed to fetch URL '{uri}': {source}")]
    Network {
        uri: String,
        #[source]
        source: BoxError,
    },

    /// The server answered with a status outside 200-299.
    #[error("HTTP request failed with status {status} for URL: {uri}")]
    HttpStatus { uri: String, status: u16 },

    /// The local path could not be opened as a readable file.
    #[error("Failed to open file {} for '{uri}': {source}", .path.display())]
    FileOpen {
        uri: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    /// The locator this error was raised for, if any.
    pub fn uri(&self) -> Option<&str> {
        match self {
            TransportError::Parse { uri, .. }
            | TransportError::UnsupportedScheme { uri, .. }
            | TransportError::Network { uri, .. }
            | TransportError::HttpStatus { uri, .. }
            | TransportError::FileOpen { uri, .. } => Some(uri),
            TransportError::Client(_) => None,
        }
    }

    /// HTTP status code for [`TransportError::HttpStatus`].
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a network failure caused by a timeout expiring.
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Network { source, .. } => {
                source.is::<tokio::time::error::Elapsed>()
                    || source
                        .downcast_ref::<reqwest::Error>()
                        .is_some_and(reqwest::Error::is_timeout)
            }
            _ => false,
        }
    }
}

pub type Result<T, E = TransportError> = std::result::Result<T, E>;
