//! Error type definitions for the EPG transliteration proxy
//!
//! Errors are layered: the conversion core only knows about
//! [`ConversionError`], the retrieval layer about [`SourceError`], and the
//! configuration loader about [`ConfigError`]. [`AppError`] unifies them for
//! the web and CLI surfaces.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Document conversion failures
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Source retrieval failures
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration loading and validation failures
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Requested EPG key is not present in the configuration
    #[error("URL key '{key}' not found in configuration file")]
    UnknownEpgKey { key: String },
}

/// Errors raised while re-serializing a single document
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Input is not well-formed XML
    #[error("Malformed XML at byte {position}: {message}")]
    MalformedInput { position: u64, message: String },

    /// Input bytes are not valid UTF-8
    #[error("Invalid UTF-8 in {context}: {message}")]
    Encoding { context: String, message: String },

    /// A pipe-delimited listing line could not be split into its fields
    #[error("Malformed listing line {line}: {reason}")]
    MalformedListing { line: usize, reason: String },

    /// Reading the input or writing the output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source retrieval errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// Local EPG file does not exist
    #[error("EPG file not found: {path:?}")]
    NotFound { path: PathBuf },

    /// Remote server answered with a non-success status
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Compressed payload could not be inflated
    #[error("Decompression failed: {message}")]
    Decompression { message: String },

    /// Local file read failures
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file is missing
    #[error("Configuration file not found: {path:?}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration file contents are not valid TOML/JSON for the schema
    #[error("Failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Parsed configuration violates a constraint
    #[error("Invalid configuration: {field} - {message}")]
    Validation { field: String, message: String },
}

impl AppError {
    /// Create an unknown EPG key error
    pub fn unknown_key<S: Into<String>>(key: S) -> Self {
        Self::UnknownEpgKey { key: key.into() }
    }
}

impl ConversionError {
    /// Create a malformed input error at the given reader position
    pub fn malformed<S: Into<String>>(position: u64, message: S) -> Self {
        Self::MalformedInput {
            position,
            message: message.into(),
        }
    }

    /// Create an encoding error for the named part of the document
    pub fn encoding<C: Into<String>, M: ToString>(context: C, message: M) -> Self {
        Self::Encoding {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a listing error for a 1-based line number
    pub fn listing<S: Into<String>>(line: usize, reason: S) -> Self {
        Self::MalformedListing {
            line,
            reason: reason.into(),
        }
    }
}

impl ConfigError {
    /// Create a validation error
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_message_matches_responder_text() {
        let err = AppError::unknown_key("mts");
        assert_eq!(
            err.to_string(),
            "URL key 'mts' not found in configuration file"
        );
    }

    #[test]
    fn test_conversion_error_wraps_into_app_error() {
        let err: AppError = ConversionError::malformed(42, "unexpected end").into();
        assert!(matches!(err, AppError::Conversion(_)));
        assert!(err.to_string().contains("byte 42"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "client went away");
        let err: ConversionError = io.into();
        assert!(matches!(err, ConversionError::Io(_)));
    }
}
