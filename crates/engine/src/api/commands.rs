//! Command surface - maps player commands to use cases.
//!
//! Chat triggers follow the server convention: `!buylevel` and `/buylevel`
//! in chat run the console command `css_buylevel`.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::infrastructure::ports::PlayerEntityPort;
use crate::use_cases::PurchaseOutcome;

const CONSOLE_PREFIX: &str = "css_";

/// Handler invoked once per dispatched command.
pub type CommandHandler =
    Arc<dyn Fn(Option<&dyn PlayerEntityPort>) -> PurchaseOutcome + Send + Sync>;

struct RegisteredCommand {
    description: String,
    handler: CommandHandler,
}

/// What happened to a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    Handled(PurchaseOutcome),
    UnknownCommand(String),
}

/// Registered console commands, keyed by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, RegisteredCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: CommandHandler,
    ) {
        let name = name.into().to_ascii_lowercase();
        let description = description.into();
        tracing::debug!(command = %name, description = %description, "Registered command");
        self.commands.insert(
            name,
            RegisteredCommand {
                description,
                handler,
            },
        );
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_ascii_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// `(name, description)` pairs in name order.
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.commands
            .iter()
            .map(|(name, cmd)| (name.as_str(), cmd.description.as_str()))
            .collect()
    }

    /// Run `name` for `player` and send the outcome's message to their chat.
    pub fn dispatch(&self, name: &str, player: Option<&dyn PlayerEntityPort>) -> CommandReply {
        let key = name.to_ascii_lowercase();
        let Some(command) = self.commands.get(&key) else {
            return CommandReply::UnknownCommand(key);
        };

        let outcome = (command.handler)(player);
        if let Some(player) = player.filter(|p| p.is_valid()) {
            player.print_to_chat(&outcome.player_message());
        }
        CommandReply::Handled(outcome)
    }
}

/// Console command named by a chat line, if the line is a chat trigger.
///
/// `"!BuyLevel"` and `"/buylevel extra"` both yield `"css_buylevel"`; a bare
/// console name such as `"css_buylevel"` is passed through. Anything else is
/// ordinary chat.
pub fn chat_trigger(line: &str) -> Option<String> {
    let word = line.split_whitespace().next()?;
    let lowered = word.to_ascii_lowercase();

    if let Some(rest) = lowered.strip_prefix(['!', '/']) {
        if rest.is_empty() {
            return None;
        }
        return Some(format!("{}{}", CONSOLE_PREFIX, rest));
    }
    lowered.starts_with(CONSOLE_PREFIX).then_some(lowered)
}
