//! Helpers for wiring the plugin against in-memory adapters.

use std::sync::Arc;

use buylevel_domain::{Level, PlayerSlot, PointBalance, ProgressionRecord, WeaponName};

use crate::api::CommandReply;
use crate::app::BuyLevelPlugin;
use crate::infrastructure::host::{PlayerRoster, SimulatedPlayer};
use crate::infrastructure::ports::{PlayerEntityPort, ProgressionPort};
use crate::infrastructure::progression::{InMemoryProgression, LevelTable};
use crate::infrastructure::settings::PurchaseSettings;
use crate::use_cases::PurchaseOutcome;

/// Level 3 is the deagle and level 4 the awp, so the common purchase in these
/// tests swaps one for the other. The last two levels are restricted.
pub const TEST_WEAPON_ORDER: &[&str] = &[
    "weapon_glock",
    "weapon_p250",
    "weapon_deagle",
    "weapon_awp",
    "weapon_hegrenade",
    "weapon_knife",
];

pub fn level(n: u32) -> Level {
    Level::new(n).expect("test level")
}

pub fn slot(n: u32) -> PlayerSlot {
    PlayerSlot::new(n)
}

/// A loaded plugin plus the host state it acts on.
pub struct E2EContext {
    pub progression: Arc<InMemoryProgression>,
    pub roster: PlayerRoster,
    pub plugin: BuyLevelPlugin,
}

impl E2EContext {
    pub fn setup() -> Self {
        Self::setup_with(PurchaseSettings::default())
    }

    pub fn setup_with(settings: PurchaseSettings) -> Self {
        Self::build(settings, true)
    }

    /// Plugin loaded without a progression service.
    pub fn setup_disabled() -> Self {
        Self::build(PurchaseSettings::default(), false)
    }

    fn build(settings: PurchaseSettings, bind_service: bool) -> Self {
        let table = LevelTable::from_names(TEST_WEAPON_ORDER.iter().copied())
            .expect("test level table");
        let progression = Arc::new(InMemoryProgression::new(table));
        let bound: Option<Arc<dyn ProgressionPort>> = if bind_service {
            Some(progression.clone())
        } else {
            None
        };
        Self {
            plugin: BuyLevelPlugin::load(bound, settings),
            progression,
            roster: PlayerRoster::new(),
        }
    }

    /// Join a player with the given progress, holding their level's weapon.
    pub fn seat(&self, n: u32, name: &str, at: u32, points: u32) -> SimulatedPlayer {
        let slot = slot(n);
        self.progression.join(slot);
        self.progression
            .set_record_level(slot, level(at))
            .expect("seed level");
        self.progression
            .set_record_points(slot, PointBalance::new(points))
            .expect("seed points");
        let weapon = self.weapon_at(at);
        self.roster.connect(slot, name, Some(&weapon))
    }

    pub fn weapon_at(&self, at: u32) -> WeaponName {
        self.progression
            .table()
            .definition(level(at).table_index())
            .expect("level in test table")
            .into_item_name()
    }

    pub fn record(&self, n: u32) -> ProgressionRecord {
        self.progression.snapshot(slot(n)).expect("record for slot")
    }

    pub fn active_item(&self, n: u32) -> Option<String> {
        self.roster.pawn(slot(n)).and_then(|p| p.active_item)
    }

    /// Issue the buy command as `player`, the way the host does for chat.
    pub fn buy(&self, player: Option<&dyn PlayerEntityPort>) -> PurchaseOutcome {
        let command = self.plugin.settings().command_name.clone();
        match self.plugin.on_command(&command, player) {
            CommandReply::Handled(outcome) => outcome,
            CommandReply::UnknownCommand(name) => panic!("command {} not registered", name),
        }
    }
}
