use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{ConfigError, ConfigResult};

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// EPG sources served by key, e.g. `GET /mts`
    #[serde(default)]
    pub epg: BTreeMap<String, EpgSourceConfig>,
    /// Top-level `port` from the flat JSON layout; folded into `web.port`
    #[serde(default, skip_serializing)]
    port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Connection timeout for remote EPG sources (humantime, e.g. "10s")
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: String,
    /// Total request timeout including the body transfer
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit the `<!-- EPG partially transliterated at ... -->` line
    #[serde(default = "default_generation_comment")]
    pub generation_comment: bool,
}

/// Channel tables and location for a single EPG source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EpgSourceConfig {
    /// File path or http(s) URL; gzip payloads are detected automatically
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub channel_translit: Vec<String>,
    #[serde(default)]
    pub channel_map: BTreeMap<String, String>,
    #[serde(default)]
    pub dummy: Vec<String>,
    #[serde(default)]
    pub invalid_tags: Vec<String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_connect_timeout() -> String {
    DEFAULT_CONNECT_TIMEOUT.to_string()
}

fn default_request_timeout() -> String {
    DEFAULT_REQUEST_TIMEOUT.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_generation_comment() -> bool {
    DEFAULT_GENERATION_COMMENT
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            generation_comment: default_generation_comment(),
        }
    }
}

impl FetchConfig {
    pub fn connect_timeout(&self) -> ConfigResult<Duration> {
        parse_duration("fetch.connect_timeout", &self.connect_timeout)
    }

    pub fn request_timeout(&self) -> ConfigResult<Duration> {
        parse_duration("fetch.request_timeout", &self.request_timeout)
    }
}

fn parse_duration(field: &str, value: &str) -> ConfigResult<Duration> {
    humantime::parse_duration(value)
        .map_err(|e| ConfigError::validation(field, format!("'{value}': {e}")))
}

impl Config {
    pub fn load() -> ConfigResult<Self> {
        let config_file =
            std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from_file(&config_file)
    }

    /// Load a TOML file, or JSON when the extension is `.json`
    pub fn load_from_file<P: AsRef<Path>>(config_file: P) -> ConfigResult<Self> {
        let path = config_file.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
        .map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?
        .normalized();

        config.validate()?;
        info!(
            "Loaded configuration from {:?} with {} EPG source(s)",
            path,
            config.epg.len()
        );
        Ok(config)
    }

    fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    fn from_json_str(contents: &str) -> Result<Self, String> {
        serde_json::from_str(contents).map_err(|e| e.to_string())
    }

    fn normalized(mut self) -> Self {
        if let Some(port) = self.port.take() {
            self.web.port = port;
        }
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.web.port == 0 {
            return Err(ConfigError::validation("web.port", "must not be 0"));
        }
        self.fetch.connect_timeout()?;
        self.fetch.request_timeout()?;

        for (key, source) in &self.epg {
            if key.trim().is_empty() || key.contains('/') {
                return Err(ConfigError::validation(
                    format!("epg.{key}"),
                    "key must be a non-empty single path segment",
                ));
            }
            if source.url.as_deref().is_some_and(|url| url.trim().is_empty()) {
                return Err(ConfigError::validation(
                    format!("epg.{key}.url"),
                    "must not be empty",
                ));
            }
        }
        Ok(())
    }

    pub fn epg_source(&self, key: &str) -> Option<&EpgSourceConfig> {
        self.epg.get(key)
    }
}
