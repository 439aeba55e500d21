use std::time::Duration;

use axum::{body::Body, routing::get, Router};
use clap::Parser;
use tempfile::TempDir;
use tokio::net::TcpListener;
use uri_fetch::{fetch, FetchOpts};

#[test]
fn test_fetch_opts_defaults() {
    let opts = FetchOpts::try_parse_from(["uri-fetch", "http://localhost:9093/api/v2/status"])
        .unwrap();

    assert_eq!(opts.uri, "http://localhost:9093/api/v2/status");
    assert_eq!(opts.timeout, Duration::ZERO);
    assert!(opts.output.is_none());
}

#[test]
fn test_fetch_opts_timeout_and_output() {
    let opts = FetchOpts::try_parse_from([
        "uri-fetch",
        "file:///tmp/status.json",
        "--timeout",
        "500ms",
        "--output",
        "/tmp/out.json",
    ])
    .unwrap();

    assert_eq!(opts.timeout, Duration::from_millis(500));
    assert_eq!(opts.output.unwrap().to_str(), Some("/tmp/out.json"));
}

#[test]
fn test_fetch_opts_rejects_bad_timeout() {
    let result = FetchOpts::try_parse_from(["uri-fetch", "http://x/", "--timeout", "soon"]);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_fetch_file_to_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("alerts.json");
    let target = temp_dir.path().join("copy.json");
    std::fs::write(&source, r#"[{"labels":{"alertname":"Up"}}]"#).unwrap();

    let opts = FetchOpts {
        uri: format!("file://{}", source.display()),
        timeout: Duration::ZERO,
        output: Some(target.clone()),
    };

    let copied = fetch(&opts).await.unwrap();

    assert_eq!(copied, std::fs::metadata(&source).unwrap().len());
    assert_eq!(std::fs::read(&target).unwrap(), std::fs::read(&source).unwrap());
}

#[tokio::test]
async fn test_fetch_unsupported_scheme_reports_uri() {
    let opts = FetchOpts {
        uri: "ftp://host/path".to_string(),
        timeout: Duration::ZERO,
        output: None,
    };

    let err = fetch(&opts).await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("'ftp'"), "{message}");
    assert!(message.contains("ftp://host/path"), "{message}");
}

#[tokio::test]
async fn test_fetch_missing_file_creates_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("never.json");

    let opts = FetchOpts {
        uri: "file:///non-existing-file.ext".to_string(),
        timeout: Duration::ZERO,
        output: Some(target.clone()),
    };

    assert!(fetch(&opts).await.is_err());
    assert!(!target.exists());
}

/// Serve a body that breaks off after its first chunk
async fn start_truncating_server() -> String {
    let app = Router::new().route(
        "/broken",
        get(|| async {
            Body::from_stream(futures::stream::iter(vec![
                Ok::<_, std::io::Error>("{\"partial\":".to_string()),
                Err(std::io::Error::other("connection cut")),
            ]))
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_fetch_interrupted_body_leaves_no_output() {
    let base_url = start_truncating_server().await;
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("status.json");

    let opts = FetchOpts {
        uri: format!("{base_url}/broken"),
        timeout: Duration::from_secs(5),
        output: Some(target.clone()),
    };

    assert!(fetch(&opts).await.is_err());
    assert!(!target.exists());
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_fetch_replaces_existing_output_on_success() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("fresh.json");
    let target = temp_dir.path().join("current.json");
    std::fs::write(&source, "new").unwrap();
    std::fs::write(&target, "old contents").unwrap();

    let opts = FetchOpts {
        uri: format!("file://{}", source.display()),
        timeout: Duration::ZERO,
        output: Some(target.clone()),
    };

    assert_eq!(fetch(&opts).await.unwrap(), 3);
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    assert!(!temp_dir.path().join("current.json.partial").exists());
}
