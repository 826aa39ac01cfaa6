use std::time::Instant;

use axum::{
    Json,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info, warn};

use super::AppState;
use super::body::{BODY_CHANNEL_CAPACITY, ChannelWriter};
use crate::epg::{ChannelRules, RewriteOptions, convert};
use crate::errors::{AppError, ConversionError};
use crate::sources::{EpgLocation, open_reader};

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "epg_sources": state.config.epg.len(),
    }))
}

/// `GET /{key}`: fetch the configured source and stream it back converted
pub async fn serve_epg(Path(key): Path<String>, State(state): State<AppState>) -> Response {
    let Some(source) = state.config.epg_source(&key) else {
        warn!("Unknown EPG key requested: {}", key);
        return (StatusCode::NOT_FOUND, AppError::unknown_key(&key).to_string()).into_response();
    };
    let Some(url) = source.url.as_deref() else {
        warn!("EPG key '{}' has no url configured", key);
        return (
            StatusCode::NOT_FOUND,
            format!("URL key '{key}' has no url configured"),
        )
            .into_response();
    };

    let location = EpgLocation::parse(url);
    info!("Key={}, URL={}", key, location);

    let data = match state.fetcher.fetch(&location).await {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to retrieve EPG '{}': {}", key, e);
            return (
                StatusCode::BAD_GATEWAY,
                format!("Failed to retrieve EPG '{key}': {e}"),
            )
                .into_response();
        }
    };
    let reader = match open_reader(data) {
        Ok(reader) => reader,
        Err(e) => {
            error!("Failed to open EPG '{}': {}", key, e);
            return (
                StatusCode::BAD_GATEWAY,
                format!("Failed to open EPG '{key}': {e}"),
            )
                .into_response();
        }
    };

    let rules = ChannelRules::from_config(source);
    let options = RewriteOptions::now(state.config.output.generation_comment);
    let (tx, rx) = mpsc::channel(BODY_CHANNEL_CAPACITY);

    tokio::task::spawn_blocking(move || {
        let started = Instant::now();
        let writer = ChannelWriter::new(tx.clone());
        match convert(reader, writer, &rules, &options) {
            Ok(stats) => info!(
                "Processed key={} in {:?}: channels={} programmes={}",
                key,
                started.elapsed(),
                stats.channels,
                stats.programmes
            ),
            Err(ConversionError::Io(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                info!("Client disconnected while streaming key={}", key);
            }
            Err(e) => {
                // Headers are already sent; abort the body so the client sees a
                // truncated transfer instead of a complete document.
                error!("Conversion of key={} failed: {}", key, e);
                let _ = tx.blocking_send(Err(std::io::Error::other(e.to_string())));
            }
        }
    });

    (
        [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
        Body::from_stream(ReceiverStream::new(rx)),
    )
        .into_response()
}
