//! Centralized error handling for the EPG transliteration proxy
//!
//! # Error Categories
//!
//! - **Conversion Errors**: malformed XML, invalid UTF-8, broken listings, I/O
//! - **Source Errors**: file and HTTP retrieval, decompression
//! - **Config Errors**: loading and validating the configuration file
//!
//! # Usage
//!
//! ```rust
//! use epg_srbcyr::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::unknown_key("missing"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for conversion Results
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;

/// Convenience type alias for Config Results
pub type ConfigResult<T> = Result<T, ConfigError>;
