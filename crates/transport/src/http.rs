//! HTTP/HTTPS transport implementation

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use tokio_util::io::StreamReader;

use crate::{parse_uri, ByteStream, Result, Transport, TransportError, TransportKind};

/// Timeout used when the caller passes [`Duration::ZERO`]
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads a resource with an HTTP GET request
///
/// The timeout bounds connection setup and the wait for response headers.
/// Once a stream has been returned, reading the body is not time-limited.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport with the given timeout
    ///
    /// A zero timeout selects [`DEFAULT_HTTP_TIMEOUT`]; there is no way to
    /// disable the timeout. No network activity happens here.
    pub fn new(timeout: Duration) -> Result<Self> {
        let timeout = if timeout.is_zero() {
            DEFAULT_HTTP_TIMEOUT
        } else {
            timeout
        };

        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self { client, timeout })
    }

    /// Effective timeout applied to each request
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Http
    }

    async fn read(&self, uri: &str) -> Result<ByteStream> {
        let url = parse_uri(uri)?;
        if TransportKind::for_scheme(url.scheme()) != Some(TransportKind::Http) {
            return Err(TransportError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
                uri: uri.to_string(),
            });
        }

        let network_error = |source: crate::error::BoxError| TransportError::Network {
            uri: uri.to_string(),
            source,
        };

        // Resolves once response headers have arrived
        let response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|elapsed| network_error(Box::new(elapsed)))?
            .map_err(|e| network_error(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus {
                uri: uri.to_string(),
                status: status.as_u16(),
            });
        }

        tracing::debug!(
            status = status.as_u16(),
            content_length = ?response.content_length(),
            "Opened HTTP stream: {}",
            uri
        );

        let body = response.bytes_stream().map_err(std::io::Error::other);
        Ok(ByteStream::new(uri, StreamReader::new(body)))
    }
}
