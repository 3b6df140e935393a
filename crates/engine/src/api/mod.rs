//! API layer - the command surface players reach the engine through.

pub mod commands;
pub mod console;

pub use commands::{chat_trigger, CommandHandler, CommandRegistry, CommandReply};
pub use console::{ConsoleCommand, ConsoleError, ConsoleHost};
