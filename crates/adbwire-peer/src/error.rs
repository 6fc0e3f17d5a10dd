/// Errors that can occur in connection-level operations.
#[derive(Debug, thiserror::Error)]
pub enum PeerError {
    /// Wire-level framing or I/O error.
    #[error("wire error: {0}")]
    Wire(#[from] adbwire_frame::WireError),

    /// A message carried a different command than the operation expected.
    #[error("unexpected command {found:#010x} (expected {expected:#010x})")]
    UnexpectedCommand { expected: u32, found: u32 },

    /// A text payload was not valid UTF-8.
    #[error("invalid identity string: {0}")]
    InvalidIdentity(#[from] std::str::Utf8Error),

    /// A text payload was missing its trailing NUL terminator.
    #[error("text payload missing NUL terminator")]
    MissingTerminator,
}

pub type Result<T> = std::result::Result<T, PeerError>;
