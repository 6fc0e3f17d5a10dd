use bytes::{BufMut, BytesMut};

/// Wire header: six little-endian u32 fields = 24 bytes.
pub const HEADER_SIZE: usize = 24;

/// The fixed message header.
///
/// Wire format:
/// ```text
/// ┌──────────┬──────────┬──────────┬─────────────┬───────────────┬──────────┐
/// │ command  │ arg0     │ arg1     │ data_length │ data_checksum │ magic    │
/// │ (4B LE)  │ (4B LE)  │ (4B LE)  │ (4B LE)     │ (4B LE)       │ (4B LE)  │
/// └──────────┴──────────┴──────────┴─────────────┴───────────────┴──────────┘
/// ```
///
/// `magic` must equal `command ^ 0xffffffff` and `data_checksum` must equal
/// the payload byte sum modulo 2^32. Header decoding does not check either
/// invariant; cross-field validation belongs to the message codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Command identifier (four ASCII bytes packed little-endian).
    pub command: u32,
    /// First command-specific argument.
    pub arg0: u32,
    /// Second command-specific argument.
    pub arg1: u32,
    /// Payload length in bytes (0 permitted).
    pub data_length: u32,
    /// Payload byte sum modulo 2^32.
    pub data_checksum: u32,
    /// Bitwise complement of `command`.
    pub magic: u32,
}

impl MessageHeader {
    /// Append the 24 header bytes to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(HEADER_SIZE);
        dst.put_u32_le(self.command);
        dst.put_u32_le(self.arg0);
        dst.put_u32_le(self.arg1);
        dst.put_u32_le(self.data_length);
        dst.put_u32_le(self.data_checksum);
        dst.put_u32_le(self.magic);
    }

    /// Parse a header from the front of `src`.
    ///
    /// Returns `None` if fewer than [`HEADER_SIZE`] bytes are available
    /// (need more data). On success, returns the header and the unconsumed
    /// remainder of `src`. Never mutates the caller's buffer.
    pub fn decode(src: &[u8]) -> Option<(Self, &[u8])> {
        if src.len() < HEADER_SIZE {
            return None;
        }

        let field = |i: usize| {
            u32::from_le_bytes(
                src[i * 4..i * 4 + 4]
                    .try_into()
                    .expect("slice is exactly 4 bytes"),
            )
        };

        let header = Self {
            command: field(0),
            arg0: field(1),
            arg1: field(2),
            data_length: field(3),
            data_checksum: field(4),
            magic: field(5),
        };

        Some((header, &src[HEADER_SIZE..]))
    }
}
