/// Errors that can occur while framing or reassembling messages.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The transmitted checksum does not match the payload byte sum.
    #[error("payload checksum mismatch (header {expected:#010x}, computed {actual:#010x})")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// The magic field is not the bitwise complement of the command.
    #[error("magic mismatch for command {command:#010x} (expected {expected:#010x}, got {found:#010x})")]
    MagicMismatch {
        command: u32,
        expected: u32,
        found: u32,
    },

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Buffered incomplete data would exceed the pending-bytes cap.
    #[error("pending buffer overflow ({size} bytes, max {max})")]
    BufferOverflow { size: usize, max: usize },

    /// An I/O error occurred while reading or writing messages.
    #[error("wire I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete message was received.
    #[error("connection closed (incomplete message)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, WireError>;
