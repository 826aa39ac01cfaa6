use std::io::{BufRead, BufReader, Cursor};

use bytes::Bytes;
use flate2::bufread::MultiGzDecoder;
use tracing::debug;

use crate::errors::{SourceError, SourceResult};

/// Compression formats recognized by magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Gzip,
    Uncompressed,
}

/// Reader handed to the streaming rewriter
pub type EpgReader = Box<dyn BufRead + Send>;

pub fn detect_compression_format(data: &[u8]) -> CompressionFormat {
    match infer::get(data) {
        Some(kind) if kind.mime_type() == "application/gzip" => CompressionFormat::Gzip,
        _ => CompressionFormat::Uncompressed,
    }
}

/// Wrap a fetched payload in a reader, inflating gzip on the fly.
///
/// The gzip header is checked up front so a corrupt archive is reported
/// before any output is produced.
pub fn open_reader(data: Bytes) -> SourceResult<EpgReader> {
    let format = detect_compression_format(&data);
    debug!("Detected compression format: {:?}", format);

    match format {
        CompressionFormat::Uncompressed => Ok(Box::new(Cursor::new(data))),
        CompressionFormat::Gzip => {
            let mut reader = BufReader::new(MultiGzDecoder::new(Cursor::new(data)));
            reader
                .fill_buf()
                .map_err(|e| SourceError::Decompression {
                    message: e.to_string(),
                })?;
            Ok(Box::new(reader))
        }
    }
}
