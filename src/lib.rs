//! uri-fetch library
//!
//! Command-line options and the fetch routine behind the `uri-fetch` binary.
//! The transport itself lives in the `uri-transport` crate, re-exported here
//! as [`transport`].
//!
//! # CLI Usage
//!
//! ```bash
//! # Fetch an Alertmanager status document with a 10 second timeout
//! uri-fetch http://localhost:9093/api/v2/status --timeout 10s
//!
//! # Copy a local file somewhere else
//! uri-fetch file:///var/lib/mock/status.json --output /tmp/status.json
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::AsyncWriteExt;
use tracing::info;

pub mod config;

pub use uri_transport as transport;
use uri_transport::{ByteStream, Transport};

#[derive(Parser, Clone, Debug)]
pub struct FetchOpts {
    /// Resource locator (http://, https:// or file:///)
    #[arg(env = "URI_FETCH_URI")]
    pub uri: String,

    /// Network timeout, e.g. "10", "10s", "500ms", "1m" (0 selects the built-in default)
    #[arg(
        long,
        default_value = "0",
        env = "URI_FETCH_TIMEOUT",
        value_parser = config::parse_duration
    )]
    pub timeout: Duration,

    /// Write the fetched bytes to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Fetch `opts.uri` and copy its bytes to the configured output.
///
/// Returns the number of bytes copied.
pub async fn fetch(opts: &FetchOpts) -> anyhow::Result<u64> {
    let transport = transport::new_transport(&opts.uri, opts.timeout)
        .with_context(|| format!("Failed to create transport for {}", opts.uri))?;

    let mut stream = transport
        .read(&opts.uri)
        .await
        .with_context(|| format!("Failed to read {}", opts.uri))?;

    let copied = match &opts.output {
        Some(path) => {
            let partial = partial_path(path);
            match copy_to_file(&mut stream, &partial).await {
                Ok(copied) => {
                    tokio::fs::rename(&partial, path).await.with_context(|| {
                        format!("Failed to move output into place: {}", path.display())
                    })?;
                    copied
                }
                Err(e) => {
                    // Never leave a truncated copy behind
                    let _ = tokio::fs::remove_file(&partial).await;
                    return Err(e.context(format!(
                        "Failed to copy {} to {}",
                        opts.uri,
                        path.display()
                    )));
                }
            }
        }
        None => {
            let mut stdout = tokio::io::stdout();
            let copied = tokio::io::copy(&mut stream, &mut stdout)
                .await
                .with_context(|| format!("Failed to copy {} to stdout", opts.uri))?;
            stdout.flush().await?;
            copied
        }
    };
    stream.close();

    info!(bytes = copied, transport = %transport.kind(), "Fetched {}", opts.uri);

    Ok(copied)
}

/// Sibling path the output is written to before it is renamed into place
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

async fn copy_to_file(stream: &mut ByteStream, path: &Path) -> anyhow::Result<u64> {
    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let copied = tokio::io::copy(stream, &mut file).await?;
    file.flush().await?;
    Ok(copied)
}
