use std::io::{ErrorKind, Read};

use crate::error::{Result, WireError};
use crate::message::Message;
use crate::reassembly::{StreamReassembler, WireConfig};

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete messages from any `Read` stream.
///
/// Handles partial reads internally — callers always get complete,
/// validated messages.
pub struct MessageReader<T> {
    inner: T,
    reassembler: StreamReassembler,
}

impl<T: Read> MessageReader<T> {
    /// Create a new message reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, WireConfig::default())
    }

    /// Create a new message reader with explicit configuration.
    pub fn with_config(inner: T, config: WireConfig) -> Self {
        Self {
            inner,
            reassembler: StreamReassembler::with_config(config),
        }
    }

    /// Read the next complete message (blocking).
    ///
    /// Returns `Err(WireError::ConnectionClosed)` when EOF is reached.
    pub fn read_message(&mut self) -> Result<Message> {
        loop {
            if let Some(message) = self.reassembler.next_message()? {
                return Ok(message);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(WireError::Io(err)),
            };

            if read == 0 {
                return Err(WireError::ConnectionClosed);
            }

            self.reassembler.extend(&chunk[..read])?;
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum payload size for subsequent message decoding.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.reassembler.set_max_payload_size(max_payload_size);
    }

    /// Current wire configuration.
    pub fn config(&self) -> &WireConfig {
        self.reassembler.config()
    }
}
