//! Partial Serbian Latin to Cyrillic transliteration of XMLTV guides

pub mod config;
pub mod epg;
pub mod errors;
pub mod sources;
pub mod transliteration;
pub mod web;

pub use errors::{AppError, AppResult};
