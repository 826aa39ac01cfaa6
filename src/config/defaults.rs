/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Configuration file
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

// Source retrieval defaults
pub const DEFAULT_CONNECT_TIMEOUT: &str = "10s";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "5m";
pub const DEFAULT_USER_AGENT: &str = concat!("epg-srbcyr/", env!("CARGO_PKG_VERSION"));

// Output defaults
pub const DEFAULT_GENERATION_COMMENT: bool = true;
