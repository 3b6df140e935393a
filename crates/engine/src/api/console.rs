//! Console host - a line-oriented stand-in for a game server.
//!
//! Each line is one host event (join, kill, death, chat, ...). Chat lines
//! that are command triggers are dispatched through the plugin exactly as a
//! game server would, one at a time, in input order.

use std::str::FromStr;
use std::sync::Arc;

use buylevel_domain::{DomainError, PlayerSlot, WeaponName};

use crate::api::commands::{chat_trigger, CommandReply};
use crate::app::BuyLevelPlugin;
use crate::infrastructure::host::PlayerRoster;
use crate::infrastructure::ports::{PlayerEntityPort, ProgressionPort};
use crate::infrastructure::progression::InMemoryProgression;

pub const HELP: &str = "commands: join <slot> <name> | leave <slot> | kill <slot> [points] | \
die <slot> | spawn <slot> | warmup on|off | status <slot> | say <slot> <text> | help | quit";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("empty line")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Join { slot: PlayerSlot, name: String },
    Leave { slot: PlayerSlot },
    Kill { slot: PlayerSlot, points: u32 },
    Die { slot: PlayerSlot },
    Spawn { slot: PlayerSlot },
    Warmup(bool),
    Status { slot: PlayerSlot },
    Say { slot: PlayerSlot, text: String },
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ConsoleError::Empty)?.to_ascii_lowercase();
        let mut slot = |usage: &'static str| -> Result<PlayerSlot, ConsoleError> {
            Ok(words.next().ok_or(ConsoleError::Usage(usage))?.parse()?)
        };

        let command = match verb.as_str() {
            "join" => {
                let slot = slot("join <slot> <name>")?;
                let name = words.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Err(ConsoleError::Usage("join <slot> <name>"));
                }
                Self::Join { slot, name }
            }
            "leave" => Self::Leave {
                slot: slot("leave <slot>")?,
            },
            "kill" => {
                let slot = slot("kill <slot> [points]")?;
                let points = match words.next() {
                    Some(raw) => raw
                        .parse()
                        .map_err(|_| ConsoleError::Usage("kill <slot> [points]"))?,
                    None => 1,
                };
                Self::Kill { slot, points }
            }
            "die" => Self::Die {
                slot: slot("die <slot>")?,
            },
            "spawn" => Self::Spawn {
                slot: slot("spawn <slot>")?,
            },
            "warmup" => match words.next().map(str::to_ascii_lowercase).as_deref() {
                Some("on") => Self::Warmup(true),
                Some("off") => Self::Warmup(false),
                _ => return Err(ConsoleError::Usage("warmup on|off")),
            },
            "status" => Self::Status {
                slot: slot("status <slot>")?,
            },
            "say" => {
                let slot = slot("say <slot> <text>")?;
                let text = words.collect::<Vec<_>>().join(" ");
                if text.is_empty() {
                    return Err(ConsoleError::Usage("say <slot> <text>"));
                }
                Self::Say { slot, text }
            }
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ConsoleError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// Host state driven by console commands.
pub struct ConsoleHost {
    plugin: BuyLevelPlugin,
    progression: Arc<InMemoryProgression>,
    roster: PlayerRoster,
}

impl ConsoleHost {
    pub fn new(plugin: BuyLevelPlugin, progression: Arc<InMemoryProgression>) -> Self {
        Self {
            plugin,
            progression,
            roster: PlayerRoster::new(),
        }
    }

    pub fn roster(&self) -> &PlayerRoster {
        &self.roster
    }

    pub fn progression(&self) -> &InMemoryProgression {
        &self.progression
    }

    /// Apply one command and return the lines to print.
    pub fn run(&self, command: ConsoleCommand) -> Vec<String> {
        match command {
            ConsoleCommand::Join { slot, name } => {
                self.progression.join(slot);
                let weapon = self.current_weapon(slot);
                self.roster.connect(slot, name.as_str(), weapon.as_ref());
                vec![format!("{} joined on slot {}", name, slot)]
            }
            ConsoleCommand::Leave { slot } => {
                self.progression.leave(slot);
                if self.roster.disconnect(slot) {
                    vec![format!("slot {} left", slot)]
                } else {
                    vec![format!("slot {} is not connected", slot)]
                }
            }
            ConsoleCommand::Kill { slot, points } => {
                match self.progression.award_points(slot, points) {
                    Ok(balance) => vec![format!("slot {} now has {} kills", slot, balance)],
                    Err(e) => vec![format!("cannot award kills: {}", e)],
                }
            }
            ConsoleCommand::Die { slot } => {
                if self.roster.set_alive(slot, false) {
                    vec![format!("slot {} died", slot)]
                } else {
                    vec![format!("slot {} is not connected", slot)]
                }
            }
            ConsoleCommand::Spawn { slot } => self.respawn(slot),
            ConsoleCommand::Warmup(on) => {
                self.progression.set_warmup(on);
                vec![format!("warmup {}", if on { "on" } else { "off" })]
            }
            ConsoleCommand::Status { slot } => self.status(slot),
            ConsoleCommand::Say { slot, text } => self.say(slot, &text),
            ConsoleCommand::Help => vec![HELP.to_string()],
            ConsoleCommand::Quit => Vec::new(),
        }
    }

    fn say(&self, slot: PlayerSlot, text: &str) -> Vec<String> {
        let player = self.roster.player(slot);
        let Some(command) = chat_trigger(text) else {
            let name = player.map(|p| p.name()).unwrap_or_else(|| slot.to_string());
            return vec![format!("{}: {}", name, text)];
        };

        let reply = self
            .plugin
            .on_command(&command, player.as_ref().map(|p| p as &dyn PlayerEntityPort));
        match reply {
            CommandReply::Handled(_) => self
                .roster
                .take_chat(slot)
                .into_iter()
                .map(|line| format!("[chat -> {}] {}", slot, line))
                .collect(),
            CommandReply::UnknownCommand(name) => vec![format!("unknown command {}", name)],
        }
    }

    fn respawn(&self, slot: PlayerSlot) -> Vec<String> {
        let Some(player) = self.roster.player(slot) else {
            return vec![format!("slot {} is not connected", slot)];
        };
        self.roster.set_alive(slot, true);
        if let Some(weapon) = self.current_weapon(slot) {
            if let Err(e) = player.give_named_item(&weapon) {
                return vec![format!("slot {} respawned without a weapon: {}", slot, e)];
            }
        }
        vec![format!("slot {} respawned", slot)]
    }

    fn status(&self, slot: PlayerSlot) -> Vec<String> {
        let Some(record) = self.progression.snapshot(slot) else {
            return vec![format!("slot {} has no progression record", slot)];
        };
        let pawn = self.roster.pawn(slot);
        let alive = pawn.as_ref().is_some_and(|p| p.alive);
        let holding = pawn
            .as_ref()
            .and_then(|p| p.active_item.as_deref())
            .unwrap_or("nothing");
        vec![format!(
            "slot {}: level {}, kills {}, holding {}, {}",
            slot,
            record.level(),
            record.points(),
            holding,
            if alive { "alive" } else { "dead" }
        )]
    }

    fn current_weapon(&self, slot: PlayerSlot) -> Option<WeaponName> {
        let level = self.progression.player_level(slot).ok()?;
        self.progression
            .level_definition(level.table_index())
            .ok()
            .flatten()
            .map(|def| def.into_item_name())
    }
}
