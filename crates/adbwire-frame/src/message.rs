use bytes::{Buf, Bytes, BytesMut};

use crate::error::{Result, WireError};
use crate::header::{MessageHeader, HEADER_SIZE};

/// A complete protocol message: command, two arguments, owned payload.
///
/// Derived header fields (`data_length`, `data_checksum`, `magic`) are
/// computed on demand by [`Message::header`], never stored, so a locally
/// constructed message always satisfies the wire invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Command identifier.
    pub command: u32,
    /// First command-specific argument.
    pub arg0: u32,
    /// Second command-specific argument.
    pub arg1: u32,
    /// The message payload.
    pub payload: Bytes,
}

impl Message {
    /// Create a new message.
    pub fn new(command: u32, arg0: u32, arg1: u32, payload: impl Into<Bytes>) -> Self {
        Self {
            command,
            arg0,
            arg1,
            payload: payload.into(),
        }
    }

    /// The header this message serializes with, derived fields included.
    pub fn header(&self) -> MessageHeader {
        MessageHeader {
            command: self.command,
            arg0: self.arg0,
            arg1: self.arg1,
            data_length: self.payload.len() as u32,
            data_checksum: checksum(&self.payload),
            magic: self.command ^ u32::MAX,
        }
    }

    /// The total wire size of this message (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}

/// Payload checksum: unsigned byte sum modulo 2^32.
pub fn checksum(payload: &[u8]) -> u32 {
    payload
        .iter()
        .fold(0u32, |sum, &byte| sum.wrapping_add(u32::from(byte)))
}

/// Encode a message into the wire format: 24 header bytes, then payload.
pub fn encode_message(message: &Message, dst: &mut BytesMut) -> Result<()> {
    if message.payload.len() > u32::MAX as usize {
        return Err(WireError::PayloadTooLarge {
            size: message.payload.len(),
            max: u32::MAX as usize,
        });
    }
    dst.reserve(message.wire_size());
    message.header().encode(dst);
    dst.extend_from_slice(&message.payload);
    Ok(())
}

/// Decode a message from a buffer.
///
/// Returns `Ok(None)` if the buffer does not yet contain a complete
/// message; the buffer is left untouched so a retry with more bytes
/// restarts from the same point. On success, consumes exactly the message
/// bytes from the buffer.
///
/// Magic and checksum are recomputed from `(command, payload)` and
/// compared against the transmitted header before anything is consumed, so
/// a corruption error never moves the framing position.
pub fn decode_message(src: &mut BytesMut, max_payload: usize) -> Result<Option<Message>> {
    let Some((header, rest)) = MessageHeader::decode(src) else {
        return Ok(None); // Need more data
    };

    let payload_len = header.data_length as usize;
    if payload_len > max_payload {
        return Err(WireError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    if rest.len() < payload_len {
        return Ok(None); // Need more data
    }

    let expected_magic = header.command ^ u32::MAX;
    if header.magic != expected_magic {
        return Err(WireError::MagicMismatch {
            command: header.command,
            expected: expected_magic,
            found: header.magic,
        });
    }

    let computed = checksum(&rest[..payload_len]);
    if header.data_checksum != computed {
        return Err(WireError::ChecksumMismatch {
            expected: header.data_checksum,
            actual: computed,
        });
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();

    Ok(Some(Message {
        command: header.command,
        arg0: header.arg0,
        arg1: header.arg1,
        payload,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CNXN, WRTE};
    use crate::reassembly::DEFAULT_MAX_PAYLOAD;

    #[test]
    fn encode_decode_roundtrip() {
        let message = Message::new(WRTE, 1, 2, &b"hello, adbwire!"[..]);
        let mut buf = BytesMut::new();
        encode_message(&message, &mut buf).unwrap();

        assert_eq!(buf.len(), message.wire_size());

        let decoded = decode_message(&mut buf, DEFAULT_MAX_PAYLOAD)
            .unwrap()
            .unwrap();
        assert_eq!(decoded, message);
        assert!(buf.is_empty());
    }

    #[test]
    fn empty_payload_checksum_is_zero() {
        assert_eq!(checksum(b""), 0);
        let message = Message::new(CNXN, 0, 0, Bytes::new());
        assert_eq!(message.header().data_checksum, 0);
        assert_eq!(message.header().data_length, 0);
    }

    #[test]
    fn checksum_is_byte_sum() {
        assert_eq!(checksum(&[0x01, 0x02, 0x03]), 6);
        assert_eq!(checksum(&[0xff; 4]), 0x3fc);
    }

    #[test]
    fn connect_magic_is_bitwise_complement() {
        let message = Message::new(CNXN, 0, 0, Bytes::new());
        assert_eq!(message.header().magic, 0xb1a7_b1bc);
    }

    #[test]
    fn incomplete_header_needs_more_data() {
        let mut buf = BytesMut::from(&[0u8; 10][..]);
        let result = decode_message(&mut buf, DEFAULT_MAX_PAYLOAD).unwrap();
        assert!(result.is_none());
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn incomplete_payload_needs_more_data_and_retains_bytes() {
        let message = Message::new(WRTE, 1, 2, &b"0123456789"[..]);
        let mut wire = BytesMut::new();
        encode_message(&message, &mut wire).unwrap();
        wire.truncate(HEADER_SIZE + 4);

        let before = wire.len();
        let result = decode_message(&mut wire, DEFAULT_MAX_PAYLOAD).unwrap();
        assert!(result.is_none());
        assert_eq!(wire.len(), before);
    }

    #[test]
    fn checksum_mismatch_is_detected() {
        let message = Message::new(WRTE, 1, 2, &b"data"[..]);
        let mut wire = BytesMut::new();
        encode_message(&message, &mut wire).unwrap();
        // Corrupt one payload byte; the header checksum no longer matches.
        let last = wire.len() - 1;
        wire[last] ^= 0xff;

        let err = decode_message(&mut wire, DEFAULT_MAX_PAYLOAD).unwrap_err();
        assert!(matches!(err, WireError::ChecksumMismatch { .. }));
    }

    #[test]
    fn magic_mismatch_is_detected() {
        let message = Message::new(WRTE, 1, 2, &b"data"[..]);
        let mut wire = BytesMut::new();
        encode_message(&message, &mut wire).unwrap();
        wire[20] ^= 0x01; // First magic byte.

        let err = decode_message(&mut wire, DEFAULT_MAX_PAYLOAD).unwrap_err();
        assert!(matches!(err, WireError::MagicMismatch { .. }));
    }

    #[test]
    fn corruption_leaves_buffer_untouched() {
        let message = Message::new(WRTE, 1, 2, &b"data"[..]);
        let mut wire = BytesMut::new();
        encode_message(&message, &mut wire).unwrap();
        wire[20] ^= 0x01;

        let before = wire.clone();
        let _ = decode_message(&mut wire, DEFAULT_MAX_PAYLOAD).unwrap_err();
        assert_eq!(wire, before);
    }

    #[test]
    fn declared_length_over_cap_is_rejected_before_buffering() {
        let mut wire = BytesMut::new();
        let header = MessageHeader {
            command: WRTE,
            arg0: 0,
            arg1: 0,
            data_length: 1 << 20,
            data_checksum: 0,
            magic: WRTE ^ u32::MAX,
        };
        header.encode(&mut wire);

        let err = decode_message(&mut wire, DEFAULT_MAX_PAYLOAD).unwrap_err();
        assert!(matches!(err, WireError::PayloadTooLarge { .. }));
    }

    #[test]
    fn two_messages_decode_in_order() {
        let first = Message::new(WRTE, 1, 0, &b"first"[..]);
        let second = Message::new(WRTE, 2, 0, &b"second"[..]);
        let mut wire = BytesMut::new();
        encode_message(&first, &mut wire).unwrap();
        encode_message(&second, &mut wire).unwrap();

        let m1 = decode_message(&mut wire, DEFAULT_MAX_PAYLOAD)
            .unwrap()
            .unwrap();
        let m2 = decode_message(&mut wire, DEFAULT_MAX_PAYLOAD)
            .unwrap()
            .unwrap();

        assert_eq!(m1, first);
        assert_eq!(m2, second);
        assert!(wire.is_empty());
    }

    #[test]
    fn remainder_after_message_is_preserved() {
        let message = Message::new(WRTE, 1, 2, &b"abc"[..]);
        let mut wire = BytesMut::new();
        encode_message(&message, &mut wire).unwrap();
        wire.extend_from_slice(b"trailing");

        let decoded = decode_message(&mut wire, DEFAULT_MAX_PAYLOAD)
            .unwrap()
            .unwrap();
        assert_eq!(decoded.payload.as_ref(), b"abc");
        assert_eq!(wire.as_ref(), b"trailing");
    }
}
