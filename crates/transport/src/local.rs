//! Local filesystem transport implementation

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{parse_uri, ByteStream, Result, Transport, TransportError, TransportKind};

/// Reads a resource from the local filesystem
///
/// `file` locators carry the path with an empty (or `localhost`) authority,
/// so absolute paths look like `file:///abs/path`. No timeout applies here:
/// opening and reading a local file is bounded only by the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTransport;

#[async_trait]
impl Transport for FileTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::File
    }

    async fn read(&self, uri: &str) -> Result<ByteStream> {
        let url = parse_uri(uri)?;
        if url.scheme() != "file" {
            return Err(TransportError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
                uri: uri.to_string(),
            });
        }

        // A non-local authority (file://name.ext) is not a filesystem path
        let path = url.to_file_path().map_err(|()| TransportError::FileOpen {
            uri: uri.to_string(),
            path: PathBuf::from(url.path()),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "locator does not name a local path",
            ),
        })?;

        let file = open_file(&path)
            .await
            .map_err(|source| TransportError::FileOpen {
                uri: uri.to_string(),
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Opened file stream: {}", path.display());

        Ok(ByteStream::new(uri, file))
    }
}

/// Open a regular file for reading, refusing directories
async fn open_file(path: &Path) -> io::Result<tokio::fs::File> {
    let file = tokio::fs::File::open(path).await?;
    if file.metadata().await?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path is a directory",
        ));
    }
    Ok(file)
}
