//! Command-line interface for uri-fetch
//!
//! # Usage Examples
//!
//! ```bash
//! # HTTP with an explicit timeout
//! uri-fetch https://alertmanager.example.com/api/v2/alerts --timeout 30s
//!
//! # Local file written to another file, with debug logging
//! RUST_LOG=debug uri-fetch file:///tmp/alerts.json --output alerts-copy.json
//! ```

use clap::Parser;
use uri_fetch::{fetch, FetchOpts};

#[derive(Parser)]
#[command(name = "uri-fetch")]
#[command(about = "Fetch a resource over HTTP/HTTPS or from a local file by URI")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    opts: FetchOpts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the fetched bytes
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    fetch(&cli.opts).await?;

    Ok(())
}
