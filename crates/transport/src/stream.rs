//! Byte stream handle returned by a successful read.

use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};

/// An open, sequentially readable resource.
///
/// The caller owns the stream from the moment a read returns it. Releasing it
/// happens exactly once: either through [`ByteStream::close`] or by dropping
/// the handle on any other exit path. For network streams this returns the
/// connection to the client, for files it closes the descriptor.
pub struct ByteStream {
    uri: String,
    inner: Pin<Box<dyn AsyncRead + Send>>,
}

impl ByteStream {
    pub(crate) fn new<R>(uri: impl Into<String>, reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self {
            uri: uri.into(),
            inner: Box::pin(reader),
        }
    }

    /// Locator this stream was opened from.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Release the underlying connection or file.
    pub fn close(self) {
        tracing::trace!("Closing stream: {}", self.uri);
    }

    /// Read the remaining bytes and release the stream.
    pub async fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.read_to_end(&mut buf).await?;
        self.close();
        Ok(buf)
    }
}

impl AsyncRead for ByteStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        self.get_mut().inner.as_mut().poll_read(cx, buf)
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStream")
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}
