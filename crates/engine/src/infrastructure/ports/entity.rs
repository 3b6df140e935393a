//! Live player entity port.

use buylevel_domain::{PlayerSlot, WeaponName};

use super::error::EntityError;

/// A player's controller and pawn on the game host.
///
/// The entity is externally mutable: the player can die, drop items or
/// disconnect between any two calls, so every mutating method reports
/// failure instead of assuming the state seen earlier still holds.
#[cfg_attr(test, mockall::automock)]
pub trait PlayerEntityPort: Send + Sync {
    fn slot(&self) -> PlayerSlot;
    fn name(&self) -> String;
    fn is_valid(&self) -> bool;
    fn is_alive(&self) -> bool;

    /// Remove the item the pawn is currently holding.
    ///
    /// Returns the removed classname, or `None` when nothing was active.
    fn remove_active_item(&self) -> Result<Option<String>, EntityError>;

    fn give_named_item(&self, item: &WeaponName) -> Result<(), EntityError>;
    fn print_to_chat(&self, message: &str);
}
