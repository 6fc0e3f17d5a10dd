use std::io::Write;

use adbwire_frame::{
    Command, Message, MessageWriter, StreamReassembler, WireConfig, PROTOCOL_VERSION,
};
use tracing::debug;

use crate::dispatch::{Dispatcher, MessageHandler};
use crate::error::Result;
use crate::outbound::{command_message, connect_message};

/// Per-connection protocol state: one reassembler, one dispatch table, one
/// writer over the outbound half of the transport.
///
/// A `Connection` is exclusively owned by whatever drives the transport's
/// byte-arrival events; it is never shared between threads and takes no
/// locks. A multi-connection server creates one `Connection` per accepted
/// transport.
pub struct Connection<T> {
    reassembler: StreamReassembler,
    dispatcher: Dispatcher,
    writer: MessageWriter<T>,
}

impl<T: Write> Connection<T> {
    /// Create a connection over `transport` with default configuration and
    /// a log-and-ignore default handler.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, WireConfig::default(), Dispatcher::new())
    }

    /// Create a connection with explicit configuration and dispatch table.
    pub fn with_config(transport: T, config: WireConfig, dispatcher: Dispatcher) -> Self {
        Self {
            reassembler: StreamReassembler::with_config(config.clone()),
            dispatcher,
            writer: MessageWriter::with_config(transport, config),
        }
    }

    /// Register a handler for a command on this connection.
    pub fn register(&mut self, command: Command, handler: impl MessageHandler + 'static) {
        self.dispatcher.register(command, handler);
    }

    /// Process a chunk of received transport bytes.
    ///
    /// Every message the chunk completes is dispatched, in order, before
    /// this call returns; each message gets exactly one handler invocation.
    /// A framing error (corruption, buffer overflow) is returned to the
    /// caller after any messages preceding it have been dispatched; the
    /// recommended response is to drop the connection, since the protocol
    /// cannot resynchronize mid-stream.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        self.reassembler.extend(chunk)?;

        while let Some(message) = self.reassembler.next_message()? {
            self.dispatcher.dispatch(&message);
        }

        Ok(())
    }

    /// Encode a message and write it to the transport.
    pub fn send(&mut self, message: &Message) -> Result<()> {
        debug!(
            command = %adbwire_frame::mnemonic(message.command),
            len = message.payload.len(),
            "sending message"
        );
        self.writer.send(message)?;
        Ok(())
    }

    /// Send the connection-establishment handshake.
    ///
    /// `arg1` advertises this side's configured maximum payload size.
    pub fn send_connect(&mut self, identity: &str) -> Result<()> {
        let max_payload = self.writer.config().max_payload_size as u32;
        self.send(&connect_message(PROTOCOL_VERSION, max_payload, identity))
    }

    /// Send a command with a NUL-terminated text payload.
    pub fn send_command(&mut self, command: u32, arg0: u32, arg1: u32, text: &str) -> Result<()> {
        self.send(&command_message(command, arg0, arg1, text))
    }

    /// Adopt the payload cap advertised by the peer's handshake.
    ///
    /// Outbound messages are capped at the smaller of the configured limit
    /// and the peer's advertised limit; oversized sends are rejected, not
    /// chunked.
    pub fn set_remote_max_payload(&mut self, max_payload: u32) {
        let ours = self.writer.config().max_payload_size;
        self.writer
            .set_max_payload_size(ours.min(max_payload as usize));
    }

    /// Bytes buffered while waiting for a message to complete.
    pub fn pending(&self) -> usize {
        self.reassembler.pending()
    }

    /// Borrow the underlying transport.
    pub fn get_ref(&self) -> &T {
        self.writer.get_ref()
    }

    /// Consume the connection and return the transport.
    pub fn into_inner(self) -> T {
        self.writer.into_inner()
    }
}
