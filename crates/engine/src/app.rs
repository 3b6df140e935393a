//! Plugin state and composition.

use std::sync::Arc;

use crate::api::{CommandRegistry, CommandReply};
use crate::infrastructure::ports::{PlayerEntityPort, ProgressionPort};
use crate::infrastructure::settings::PurchaseSettings;
use crate::use_cases::{BuyLevel, PurchaseOutcome};

/// The buy-level plugin as loaded into a game host.
///
/// The progression service is resolved by the host before construction and
/// handed in; when it is missing the plugin loads inert, with no commands
/// registered.
pub struct BuyLevelPlugin {
    settings: PurchaseSettings,
    buy_level: Arc<BuyLevel>,
    commands: CommandRegistry,
}

impl BuyLevelPlugin {
    pub const MODULE_NAME: &'static str = "BuyLevel Plugin";
    pub const MODULE_VERSION: &'static str = env!("CARGO_PKG_VERSION");
    pub const MODULE_DESCRIPTION: &'static str =
        "Allows players to !buylevel like in the old CS:GO server";

    /// Wire the plugin and register its command if the service is bound.
    pub fn load(
        progression: Option<Arc<dyn ProgressionPort>>,
        settings: PurchaseSettings,
    ) -> Self {
        let bound = progression.is_some();
        let buy_level = Arc::new(BuyLevel::new(progression, &settings));
        let mut commands = CommandRegistry::new();

        if bound {
            let handler_use_case = Arc::clone(&buy_level);
            commands.register(
                settings.command_name.clone(),
                "Buy a level in GunGame",
                Arc::new(move |player: Option<&dyn PlayerEntityPort>| {
                    handler_use_case.execute(player)
                }),
            );
            tracing::info!(
                module = Self::MODULE_NAME,
                version = Self::MODULE_VERSION,
                command = %settings.command_name,
                cost_per_level = settings.cost_per_level.value(),
                "Loaded successfully"
            );
        } else {
            tracing::error!(
                module = Self::MODULE_NAME,
                "Progression service not found, buy level is disabled"
            );
        }

        Self {
            settings,
            buy_level,
            commands,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.buy_level.is_available()
    }

    pub fn settings(&self) -> &PurchaseSettings {
        &self.settings
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Run a console command on behalf of `player`.
    pub fn on_command(&self, name: &str, player: Option<&dyn PlayerEntityPort>) -> CommandReply {
        self.commands.dispatch(name, player)
    }

    /// Purchase without going through the command surface. Reports
    /// `ServiceUnavailable` when the plugin loaded inert.
    pub fn attempt_purchase(&self, player: Option<&dyn PlayerEntityPort>) -> PurchaseOutcome {
        self.buy_level.execute(player)
    }
}
