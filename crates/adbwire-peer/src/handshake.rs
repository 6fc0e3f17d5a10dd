use adbwire_frame::{Message, CNXN};

use crate::error::{PeerError, Result};

/// Fields negotiated by a received connection-establishment message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectInfo {
    /// Protocol version the peer speaks (`arg0`).
    pub version: u32,
    /// Maximum single-message payload size the peer accepts (`arg1`).
    pub max_payload: u32,
    /// Peer identity banner, trailing NUL stripped.
    pub identity: String,
}

impl ConnectInfo {
    /// Parse a received handshake message.
    ///
    /// Fails when the command is not connection-establishment, when the
    /// payload lacks its trailing NUL, or when the banner is not UTF-8.
    pub fn from_message(message: &Message) -> Result<Self> {
        if message.command != CNXN {
            return Err(PeerError::UnexpectedCommand {
                expected: CNXN,
                found: message.command,
            });
        }

        let Some((&0, banner)) = message.payload.split_last() else {
            return Err(PeerError::MissingTerminator);
        };
        let identity = std::str::from_utf8(banner)?.to_string();

        Ok(Self {
            version: message.arg0,
            max_payload: message.arg1,
            identity,
        })
    }
}
