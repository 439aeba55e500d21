//! Resource transport dispatched on the URI scheme
//!
//! Given a resource locator, this crate picks the retrieval mechanism that
//! matches its scheme and returns an open byte stream over the contents.
//!
//! # Schemes
//!
//! - **HTTP/HTTPS** (`http://`, `https://`): GET request, non-2xx statuses fail
//! - **File** (`file:///abs/path`): local file opened for reading
//!
//! Anything else is rejected with [`TransportError::UnsupportedScheme`].
//!
//! # Timeouts
//!
//! The timeout passed to [`new_transport`] only applies to HTTP/HTTPS. A zero
//! timeout selects [`DEFAULT_HTTP_TIMEOUT`]. File reads ignore it.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use uri_transport::{new_transport, Transport};
//!
//! let uri = "http://localhost:9093/api/v2/status";
//! let transport = new_transport(uri, Duration::from_secs(10))?;
//! let stream = transport.read(uri).await?;
//! let body = stream.into_bytes().await?;
//! ```
//!
//! The content of the stream is not inspected here; decoding it (and any
//! failure doing so) is the caller's business.

mod error;
mod http;
mod local;
mod stream;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

pub use error::{BoxError, Result, TransportError};
pub use http::{HttpTransport, DEFAULT_HTTP_TIMEOUT};
pub use local::FileTransport;
pub use stream::ByteStream;

/// Schemes accepted by [`new_transport`]
pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "file"];

/// Which retrieval mechanism a transport uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    Http,
    File,
}

impl TransportKind {
    /// Map a parsed URI scheme onto a transport kind (exact match)
    pub fn for_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "http" | "https" => Some(TransportKind::Http),
            "file" => Some(TransportKind::File),
            _ => None,
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Http => write!(f, "http"),
            TransportKind::File => write!(f, "file"),
        }
    }
}

/// Reads a resource locator into a byte stream
///
/// On success the returned stream is owned by the caller, who must release
/// it (see [`ByteStream::close`]). On failure no stream exists.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Retrieval mechanism used by this transport
    fn kind(&self) -> TransportKind;

    /// Open the resource named by `uri`
    async fn read(&self, uri: &str) -> Result<ByteStream>;
}

/// Transport selected by [`new_transport`]
///
/// Adding a scheme means adding a variant here and one arm in
/// [`new_transport`]; existing variants stay untouched.
#[derive(Debug, Clone)]
pub enum SchemeTransport {
    Http(HttpTransport),
    File(FileTransport),
}

impl SchemeTransport {
    /// Effective network timeout, `None` for transports without one
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            SchemeTransport::Http(t) => Some(t.timeout()),
            SchemeTransport::File(_) => None,
        }
    }
}

#[async_trait]
impl Transport for SchemeTransport {
    fn kind(&self) -> TransportKind {
        match self {
            SchemeTransport::Http(t) => t.kind(),
            SchemeTransport::File(t) => t.kind(),
        }
    }

    async fn read(&self, uri: &str) -> Result<ByteStream> {
        match self {
            SchemeTransport::Http(t) => t.read(uri).await,
            SchemeTransport::File(t) => t.read(uri).await,
        }
    }
}

/// Create the transport that handles the scheme of `uri`
///
/// Fails with [`TransportError::Parse`] for malformed locators and
/// [`TransportError::UnsupportedScheme`] for schemes outside
/// [`SUPPORTED_SCHEMES`]. Performs no I/O.
pub fn new_transport(uri: &str, timeout: Duration) -> Result<SchemeTransport> {
    let url = parse_uri(uri)?;

    let transport = match TransportKind::for_scheme(url.scheme()) {
        Some(TransportKind::Http) => SchemeTransport::Http(HttpTransport::new(timeout)?),
        Some(TransportKind::File) => SchemeTransport::File(FileTransport),
        None => {
            return Err(TransportError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
                uri: uri.to_string(),
            })
        }
    };

    tracing::debug!("Using {} transport for: {}", transport.kind(), uri);

    Ok(transport)
}

/// Create the matching transport and read `uri` with it
pub async fn open(uri: &str, timeout: Duration) -> Result<ByteStream> {
    new_transport(uri, timeout)?.read(uri).await
}

pub(crate) fn parse_uri(uri: &str) -> Result<Url> {
    Url::parse(uri).map_err(|source| TransportError::Parse {
        uri: uri.to_string(),
        source,
    })
}
