//! Builders for well-known outbound messages.
//!
//! Text-bearing commands carry their string payload with a single trailing
//! NUL byte, per protocol convention.

use adbwire_frame::{Message, CNXN};

/// The conventional client identity banner sent in the handshake.
pub const HOST_IDENTITY: &str = "host::";

/// Build the connection-establishment handshake message.
///
/// `arg0` carries the protocol version, `arg1` the maximum single-message
/// payload size the sender supports; the payload is the identity string
/// with one trailing NUL.
pub fn connect_message(version: u32, max_payload: u32, identity: &str) -> Message {
    Message::new(CNXN, version, max_payload, terminated(identity))
}

/// Build a generic command message with a NUL-terminated text payload.
pub fn command_message(command: u32, arg0: u32, arg1: u32, text: &str) -> Message {
    Message::new(command, arg0, arg1, terminated(text))
}

fn terminated(text: &str) -> Vec<u8> {
    let mut payload = Vec::with_capacity(text.len() + 1);
    payload.extend_from_slice(text.as_bytes());
    payload.push(0);
    payload
}

#[cfg(test)]
mod tests {
    use adbwire_frame::{OPEN, PROTOCOL_VERSION};

    use super::*;

    #[test]
    fn connect_message_matches_handshake_convention() {
        let message = connect_message(PROTOCOL_VERSION, 4096, HOST_IDENTITY);

        assert_eq!(message.command, CNXN);
        assert_eq!(message.arg0, 0x0100_0000);
        assert_eq!(message.arg1, 4096);
        assert_eq!(message.payload.as_ref(), b"host::\0");
    }

    #[test]
    fn connect_header_invariants_hold_by_construction() {
        let message = connect_message(PROTOCOL_VERSION, 4096, HOST_IDENTITY);
        let header = message.header();

        assert_eq!(header.magic, CNXN ^ u32::MAX);
        assert_eq!(header.data_length, 7);
        assert_eq!(header.data_checksum, adbwire_frame::checksum(b"host::\0"));
    }

    #[test]
    fn command_message_terminates_text_payload() {
        let message = command_message(OPEN, 1, 0, "shell:ls");

        assert_eq!(message.command, OPEN);
        assert_eq!(message.payload.as_ref(), b"shell:ls\0");
    }

    #[test]
    fn empty_text_still_carries_terminator() {
        let message = command_message(OPEN, 1, 0, "");
        assert_eq!(message.payload.as_ref(), b"\0");
    }
}
