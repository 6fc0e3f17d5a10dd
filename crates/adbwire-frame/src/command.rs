//! Well-known command identifiers.
//!
//! Each identifier packs a four-character ASCII mnemonic little-endian into
//! a `u32`, so the raw value reads as its name in a hex dump.

/// Framing/alignment marker. Never carried as a message command.
pub const SYNC: u32 = 0x434e5953;

/// Connection establishment (handshake).
pub const CNXN: u32 = 0x4e584e43;

/// Open a logical stream.
pub const OPEN: u32 = 0x4e45504f;

/// Stream ready / acknowledgement.
pub const OKAY: u32 = 0x59414b4f;

/// Close a logical stream.
pub const CLSE: u32 = 0x45534c43;

/// Write payload to a logical stream.
pub const WRTE: u32 = 0x45545257;

/// Protocol version carried in the handshake `arg0`.
pub const PROTOCOL_VERSION: u32 = 0x0100_0000;

/// The closed set of dispatchable commands.
///
/// `SYNC` is deliberately absent: it marks framing alignment on the wire
/// and never reaches dispatch as a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Connection establishment (`CNXN`).
    Connect,
    /// Stream open request (`OPEN`).
    Open,
    /// Stream ready / acknowledgement (`OKAY`).
    Okay,
    /// Stream close (`CLSE`).
    Close,
    /// Stream write (`WRTE`).
    Write,
}

impl Command {
    /// Map a raw wire identifier to a known command.
    pub fn from_wire(raw: u32) -> Option<Self> {
        match raw {
            CNXN => Some(Command::Connect),
            OPEN => Some(Command::Open),
            OKAY => Some(Command::Okay),
            CLSE => Some(Command::Close),
            WRTE => Some(Command::Write),
            _ => None,
        }
    }

    /// The raw wire identifier for this command.
    pub fn to_wire(self) -> u32 {
        match self {
            Command::Connect => CNXN,
            Command::Open => OPEN,
            Command::Okay => OKAY,
            Command::Close => CLSE,
            Command::Write => WRTE,
        }
    }
}

/// Render a command identifier as its four-character ASCII mnemonic.
///
/// Non-printable bytes are shown as `.` so arbitrary identifiers stay
/// loggable.
pub fn mnemonic(command: u32) -> String {
    command
        .to_le_bytes()
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}
