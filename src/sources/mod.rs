//! EPG source retrieval
//!
//! A configured `url` is either an http(s) URL or a local path. Both are
//! read fully into memory, then handed to [`open_reader`] which inflates
//! gzip payloads while the rewriter consumes them.

use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

use bytes::Bytes;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::config::FetchConfig;
use crate::errors::{AppResult, SourceError, SourceResult};

pub mod decompression;

pub use decompression::{CompressionFormat, EpgReader, detect_compression_format, open_reader};

static SENSITIVE_QUERY_PARAMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([?&](?:username|password|user|pass|pwd|passwd|token)=)[^&]*")
        .expect("sensitive query pattern is a valid regex")
});

/// Where an EPG document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpgLocation {
    File(PathBuf),
    Url(Url),
}

impl EpgLocation {
    /// Anything that does not parse as an http(s) or file URL is a path
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::File)
                .unwrap_or_else(|_| Self::File(PathBuf::from(location))),
            _ => Self::File(PathBuf::from(location)),
        }
    }
}

impl fmt::Display for EpgLocation {
    /// Credentials in URLs are masked
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(&obfuscate_credentials(url)),
        }
    }
}

fn obfuscate_credentials(url: &Url) -> String {
    let mut masked = url.clone();
    if !masked.username().is_empty() || masked.password().is_some() {
        let _ = masked.set_username("****");
        let _ = masked.set_password(Some("****"));
    }
    SENSITIVE_QUERY_PARAMS
        .replace_all(masked.as_str(), "${1}****")
        .into_owned()
}

/// Downloads or reads EPG payloads
#[derive(Debug, Clone)]
pub struct EpgFetcher {
    client: Client,
}

impl EpgFetcher {
    pub fn new(config: &FetchConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout()?)
            .timeout(config.request_timeout()?)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(SourceError::from)?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, location: &EpgLocation) -> SourceResult<Bytes> {
        let data = match location {
            EpgLocation::File(path) => match tokio::fs::read(path).await {
                Ok(data) => Bytes::from(data),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(SourceError::NotFound { path: path.clone() });
                }
                Err(e) => return Err(e.into()),
            },
            EpgLocation::Url(url) => {
                debug!("Fetching EPG from {}", location);
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Http {
                        status: status.as_u16(),
                        url: obfuscate_credentials(url),
                    });
                }
                response.bytes().await?
            }
        };

        info!("Retrieved {} bytes from {}", data.len(), location);
        Ok(data)
    }
}
