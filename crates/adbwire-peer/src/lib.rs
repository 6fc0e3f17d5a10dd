//! Connection-level layer for the adbwire debug transport.
//!
//! Builds on `adbwire-frame`: routes decoded messages to registered
//! handlers by command, constructs well-known outbound messages (handshake
//! and NUL-terminated text commands), and bundles the per-connection state
//! (reassembler, dispatch table, writer) into a single owned value.

pub mod connection;
pub mod dispatch;
pub mod error;
pub mod handshake;
pub mod outbound;

pub use connection::Connection;
pub use dispatch::{Dispatcher, MessageHandler};
pub use error::{PeerError, Result};
pub use handshake::ConnectInfo;
pub use outbound::{command_message, connect_message, HOST_IDENTITY};
