//! Message framing and stream reassembly for the adbwire debug transport.
//!
//! This is the wire layer of adbwire. Every message carries a fixed 24-byte
//! header of six little-endian `u32` fields:
//! - A command identifier (four ASCII bytes packed little-endian)
//! - Two command-specific arguments
//! - The payload length in bytes
//! - A payload checksum (byte sum modulo 2^32)
//! - A magic field equal to the bitwise complement of the command
//!
//! The magic and checksum fields are the protocol's only integrity checks
//! and are re-verified on every decode.

pub mod command;
pub mod error;
pub mod header;
pub mod message;
pub mod reader;
pub mod reassembly;
pub mod writer;

pub use command::{mnemonic, Command, CLSE, CNXN, OKAY, OPEN, PROTOCOL_VERSION, SYNC, WRTE};
pub use error::{Result, WireError};
pub use header::{MessageHeader, HEADER_SIZE};
pub use message::{checksum, decode_message, encode_message, Message};
pub use reader::MessageReader;
pub use reassembly::{StreamReassembler, WireConfig, DEFAULT_MAX_PAYLOAD, DEFAULT_MAX_PENDING};
pub use writer::MessageWriter;
