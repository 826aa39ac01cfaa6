//! Bridge from the blocking rewriter to a streamed response body

use std::io::{self, Write};

use bytes::Bytes;
use tokio::sync::mpsc;

/// Chunks buffered between the conversion thread and the client
pub const BODY_CHANNEL_CAPACITY: usize = 32;

pub type BodyChunk = io::Result<Bytes>;

/// [`Write`] sink that forwards every chunk to an async receiver.
///
/// Must only be used from a blocking context. Once the receiver is gone
/// (the client disconnected) writes fail with [`io::ErrorKind::BrokenPipe`],
/// which aborts the conversion.
pub struct ChannelWriter {
    sender: mpsc::Sender<BodyChunk>,
}

impl ChannelWriter {
    pub fn new(sender: mpsc::Sender<BodyChunk>) -> Self {
        Self { sender }
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.sender
            .blocking_send(Ok(Bytes::copy_from_slice(buf)))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "response body closed"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
