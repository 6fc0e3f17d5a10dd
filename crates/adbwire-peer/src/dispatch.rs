use std::collections::HashMap;

use adbwire_frame::{mnemonic, Command, Message};
use tracing::warn;

/// A handler for decoded messages of one command.
pub trait MessageHandler {
    /// Consume a decoded message. Called exactly once per dispatched
    /// message, synchronously, on the connection's own execution context.
    /// Long-running work belongs elsewhere; handlers should return
    /// promptly.
    fn handle(&mut self, message: &Message);
}

impl<F: FnMut(&Message)> MessageHandler for F {
    fn handle(&mut self, message: &Message) {
        self(message)
    }
}

/// Routes decoded messages to registered handlers by command.
///
/// The dispatch table is resolved at registration time over the closed
/// [`Command`] set. Messages whose command is unknown or unregistered go
/// to the default handler, which is a safety net and must not fail.
pub struct Dispatcher {
    handlers: HashMap<Command, Box<dyn MessageHandler>>,
    default: Box<dyn MessageHandler>,
}

impl Dispatcher {
    /// Create a dispatcher whose default handler logs and ignores.
    pub fn new() -> Self {
        Self::with_default(|message: &Message| {
            warn!(
                command = %mnemonic(message.command),
                len = message.payload.len(),
                "unhandled message"
            );
        })
    }

    /// Create a dispatcher with an explicit default handler.
    pub fn with_default(handler: impl MessageHandler + 'static) -> Self {
        Self {
            handlers: HashMap::new(),
            default: Box::new(handler),
        }
    }

    /// Register a handler for a command, replacing any prior registration.
    pub fn register(&mut self, command: Command, handler: impl MessageHandler + 'static) {
        self.handlers.insert(command, Box::new(handler));
    }

    /// Remove the handler for a command; its messages fall back to the
    /// default handler afterwards.
    pub fn unregister(&mut self, command: Command) {
        self.handlers.remove(&command);
    }

    /// Whether a handler is registered for a command.
    pub fn is_registered(&self, command: Command) -> bool {
        self.handlers.contains_key(&command)
    }

    /// Route one message to its handler.
    ///
    /// Exactly one handler invocation per message, in call order; there is
    /// no reordering or concurrency between invocations.
    pub fn dispatch(&mut self, message: &Message) {
        let handler = Command::from_wire(message.command)
            .and_then(|command| self.handlers.get_mut(&command));

        match handler {
            Some(handler) => handler.handle(message),
            None => self.default.handle(message),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
