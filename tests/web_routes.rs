use std::io::Write;

use axum::http::StatusCode;
use axum_test::TestServer;
use flate2::{Compression, write::GzEncoder};
use serde_json::Value;
use tempfile::TempDir;

use epg_srbcyr::config::{Config, EpgSourceConfig};
use epg_srbcyr::web::{AppState, create_router};

const GUIDE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tv date="20240315">
  <channel id="RTS 1"><display-name>RTS 1</display-name></channel>
  <programme start="20240315200000 +0100" stop="20240315203000 +0100" channel="RTS 1">
    <title>Dnevnik</title>
    <credits><director>Petar Petrović</director></credits>
  </programme>
</tv>
"#;

fn source(url: String) -> EpgSourceConfig {
    EpgSourceConfig {
        url: Some(url),
        channel_translit: vec!["rts 1".to_string()],
        invalid_tags: vec!["credits".to_string()],
        ..Default::default()
    }
}

fn test_server(dir: &TempDir) -> TestServer {
    let plain = dir.path().join("guide.xml");
    std::fs::write(&plain, GUIDE).unwrap();

    let gzipped = dir.path().join("guide.xml.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(GUIDE.as_bytes()).unwrap();
    std::fs::write(&gzipped, encoder.finish().unwrap()).unwrap();

    let mut config = Config::default();
    config.output.generation_comment = false;
    config
        .epg
        .insert("plain".to_string(), source(plain.display().to_string()));
    config
        .epg
        .insert("gz".to_string(), source(gzipped.display().to_string()));
    config.epg.insert(
        "missing".to_string(),
        source(dir.path().join("nope.xml").display().to_string()),
    );

    let state = AppState::new(config).unwrap();
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["epg_sources"], 3);
}

#[tokio::test]
async fn test_serves_converted_guide() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server.get("/plain").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/xml; charset=utf-8"
    );

    let text = response.text();
    assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n"));
    assert!(text.contains("<title>Дневник</title>"));
    assert!(text.contains("<display-name>RTS 1</display-name>"));
    assert!(!text.contains("Petrović"));
    assert!(text.ends_with("</tv>\n"));
}

#[tokio::test]
async fn test_gzip_source_is_inflated() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let plain = server.get("/plain").await.text();
    let gzipped = server.get("/gz").await.text();
    assert_eq!(plain, gzipped);
}

#[tokio::test]
async fn test_unknown_key_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server.get("/other").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.text(),
        "URL key 'other' not found in configuration file"
    );
}

#[tokio::test]
async fn test_unreachable_source_is_bad_gateway() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server.get("/missing").await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert!(response.text().contains("missing"));
}
