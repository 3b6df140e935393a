//! Simulated game host: connected players and their pawns.
//!
//! The console binary and the end-to-end tests drive purchases against
//! these entities instead of a real game server. State is shared through a
//! [`DashMap`], so a [`SimulatedPlayer`] handle observes disconnects and
//! deaths that happen after it was handed out.

use std::sync::Arc;

use buylevel_domain::{PlayerSlot, WeaponName};
use dashmap::DashMap;

use crate::infrastructure::ports::{EntityError, PlayerEntityPort};

/// Host-side state of one connected player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PawnState {
    pub name: String,
    pub alive: bool,
    pub weapon_services: bool,
    pub active_item: Option<String>,
    pub inventory: Vec<String>,
    pub chat: Vec<String>,
}

impl PawnState {
    fn spawned(name: String) -> Self {
        Self {
            name,
            alive: true,
            weapon_services: true,
            active_item: None,
            inventory: Vec::new(),
            chat: Vec::new(),
        }
    }
}

/// All connected players, keyed by slot.
#[derive(Debug, Clone, Default)]
pub struct PlayerRoster {
    pawns: Arc<DashMap<PlayerSlot, PawnState>>,
}

impl PlayerRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect a player and spawn their pawn holding `starting_item`.
    pub fn connect(
        &self,
        slot: PlayerSlot,
        name: impl Into<String>,
        starting_item: Option<&WeaponName>,
    ) -> SimulatedPlayer {
        let mut pawn = PawnState::spawned(name.into());
        if let Some(item) = starting_item {
            pawn.inventory.push(item.to_string());
            pawn.active_item = Some(item.to_string());
        }
        tracing::info!(slot = %slot, name = %pawn.name, "Player connected");
        self.pawns.insert(slot, pawn);
        self.handle(slot)
    }

    pub fn disconnect(&self, slot: PlayerSlot) -> bool {
        let removed = self.pawns.remove(&slot).is_some();
        if removed {
            tracing::info!(slot = %slot, "Player disconnected");
        }
        removed
    }

    /// Handle for a connected slot.
    pub fn player(&self, slot: PlayerSlot) -> Option<SimulatedPlayer> {
        self.pawns.contains_key(&slot).then(|| self.handle(slot))
    }

    pub fn set_alive(&self, slot: PlayerSlot, alive: bool) -> bool {
        self.update(slot, |pawn| pawn.alive = alive)
    }

    pub fn set_weapon_services(&self, slot: PlayerSlot, present: bool) -> bool {
        self.update(slot, |pawn| pawn.weapon_services = present)
    }

    pub fn pawn(&self, slot: PlayerSlot) -> Option<PawnState> {
        self.pawns.get(&slot).map(|p| p.clone())
    }

    /// Drain the chat lines sent to `slot` so far.
    pub fn take_chat(&self, slot: PlayerSlot) -> Vec<String> {
        self.pawns
            .get_mut(&slot)
            .map(|mut p| std::mem::take(&mut p.chat))
            .unwrap_or_default()
    }

    fn update(&self, slot: PlayerSlot, f: impl FnOnce(&mut PawnState)) -> bool {
        match self.pawns.get_mut(&slot) {
            Some(mut pawn) => {
                f(&mut pawn);
                true
            }
            None => false,
        }
    }

    fn handle(&self, slot: PlayerSlot) -> SimulatedPlayer {
        SimulatedPlayer {
            slot,
            pawns: Arc::clone(&self.pawns),
        }
    }
}

/// A player entity handle on the simulated host.
#[derive(Debug, Clone)]
pub struct SimulatedPlayer {
    slot: PlayerSlot,
    pawns: Arc<DashMap<PlayerSlot, PawnState>>,
}

impl PlayerEntityPort for SimulatedPlayer {
    fn slot(&self) -> PlayerSlot {
        self.slot
    }

    fn name(&self) -> String {
        self.pawns
            .get(&self.slot)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn is_valid(&self) -> bool {
        self.pawns.contains_key(&self.slot)
    }

    fn is_alive(&self) -> bool {
        self.pawns.get(&self.slot).is_some_and(|p| p.alive)
    }

    fn remove_active_item(&self) -> Result<Option<String>, EntityError> {
        let mut pawn = self.pawns.get_mut(&self.slot).ok_or(EntityError::Gone)?;
        if !pawn.weapon_services {
            return Err(EntityError::NoWeaponServices);
        }
        let Some(active) = pawn.active_item.take() else {
            return Ok(None);
        };
        if let Some(pos) = pawn.inventory.iter().position(|item| *item == active) {
            pawn.inventory.remove(pos);
        }
        Ok(Some(active))
    }

    fn give_named_item(&self, item: &WeaponName) -> Result<(), EntityError> {
        let mut pawn = self.pawns.get_mut(&self.slot).ok_or(EntityError::Gone)?;
        if !pawn.weapon_services {
            return Err(EntityError::NoWeaponServices);
        }
        if !pawn.alive {
            return Err(EntityError::NotAlive);
        }
        pawn.inventory.push(item.to_string());
        pawn.active_item = Some(item.to_string());
        Ok(())
    }

    fn print_to_chat(&self, message: &str) {
        if let Some(mut pawn) = self.pawns.get_mut(&self.slot) {
            tracing::info!(target: "chat", slot = %self.slot, "{}", message);
            pawn.chat.push(message.to_string());
        }
    }
}
