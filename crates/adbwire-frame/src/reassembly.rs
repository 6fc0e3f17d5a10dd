use bytes::BytesMut;
use tracing::trace;

use crate::error::{Result, WireError};
use crate::message::{decode_message, Message};

/// Default maximum payload size: 4 KiB, the protocol's negotiated default.
pub const DEFAULT_MAX_PAYLOAD: usize = 4096;

/// Default cap on buffered incomplete data: 1 MiB.
pub const DEFAULT_MAX_PENDING: usize = 1024 * 1024;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Configuration for the wire layer.
#[derive(Debug, Clone)]
pub struct WireConfig {
    /// Maximum payload size in bytes. Default: 4 KiB.
    pub max_payload_size: usize,
    /// Maximum bytes held while waiting for a message to complete.
    /// Default: 1 MiB.
    pub max_pending_bytes: usize,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            max_pending_bytes: DEFAULT_MAX_PENDING,
        }
    }
}

/// Turns an arbitrary sequence of received byte chunks into discrete
/// messages.
///
/// One instance per connection; the buffer has a single owner and is never
/// shared. Messages spanning multiple feeds are reassembled correctly
/// regardless of how the transport fragments them.
pub struct StreamReassembler {
    buf: BytesMut,
    config: WireConfig,
}

impl StreamReassembler {
    /// Create a reassembler with default configuration.
    pub fn new() -> Self {
        Self::with_config(WireConfig::default())
    }

    /// Create a reassembler with explicit configuration.
    pub fn with_config(config: WireConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Buffer a received chunk without decoding.
    ///
    /// Fails with [`WireError::BufferOverflow`] when the chunk would push
    /// buffered incomplete data past `max_pending_bytes`; the chunk is not
    /// appended in that case.
    pub fn extend(&mut self, chunk: &[u8]) -> Result<()> {
        let pending = self.buf.len() + chunk.len();
        if pending > self.config.max_pending_bytes {
            return Err(WireError::BufferOverflow {
                size: pending,
                max: self.config.max_pending_bytes,
            });
        }
        self.buf.extend_from_slice(chunk);
        Ok(())
    }

    /// Decode the next complete message from the buffer, if any.
    ///
    /// Returns `Ok(None)` when more bytes are needed; the buffer is
    /// retained unchanged. A corruption error also leaves the buffer
    /// position unchanged, so messages decoded before the corrupt point
    /// have already been handed out and nothing past it is ever consumed.
    pub fn next_message(&mut self) -> Result<Option<Message>> {
        let message = decode_message(&mut self.buf, self.config.max_payload_size)?;
        if let Some(message) = &message {
            trace!(
                command = %crate::command::mnemonic(message.command),
                len = message.payload.len(),
                "message reassembled"
            );
        }
        Ok(message)
    }

    /// Append a received chunk and emit every message it completes.
    ///
    /// Messages are returned in the order their bytes completed assembly;
    /// an incomplete trailer is retained for the next call. On a corruption
    /// error, messages already decoded from this chunk are dropped along
    /// with the error — callers that must observe the valid prefix should
    /// drive [`extend`](Self::extend) and
    /// [`next_message`](Self::next_message) directly. The protocol has no
    /// mid-stream resynchronization marker, so the expected response to
    /// corruption is dropping the connection either way.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<Message>> {
        self.extend(chunk)?;

        let mut messages = Vec::new();
        while let Some(message) = self.next_message()? {
            messages.push(message);
        }

        Ok(messages)
    }

    /// Number of buffered bytes awaiting message completion.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Whether no partial data is buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Update maximum payload size for subsequent decoding.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }

    /// Current configuration.
    pub fn config(&self) -> &WireConfig {
        &self.config
    }
}

impl Default for StreamReassembler {
    fn default() -> Self {
        Self::new()
    }
}
