//! Equipment synchronization after a purchased level.
//!
//! Best effort against a live entity: any failure becomes an
//! [`EquipmentReport::Failed`] and never reaches back into the purchase.

use buylevel_domain::WeaponName;

use crate::infrastructure::ports::{EntityError, PlayerEntityPort};

use super::outcome::EquipmentReport;

/// Swaps the player's active item for the item of their new level.
#[derive(Debug, Default, Clone, Copy)]
pub struct EquipmentSync;

impl EquipmentSync {
    pub fn new() -> Self {
        Self
    }

    /// Remove the active item, then grant `item`.
    ///
    /// A failed removal skips the grant so the player is not left holding
    /// two primary weapons.
    pub fn sync(&self, player: &dyn PlayerEntityPort, item: &WeaponName) -> EquipmentReport {
        match self.try_sync(player, item) {
            Ok(removed) => {
                tracing::debug!(
                    slot = %player.slot(),
                    removed = removed.as_deref().unwrap_or("none"),
                    granted = %item,
                    "Equipment synchronized"
                );
                EquipmentReport::Equipped { removed }
            }
            Err(error) => {
                tracing::warn!(
                    slot = %player.slot(),
                    item = %item,
                    error = %error,
                    "Equipment sync failed after purchase"
                );
                EquipmentReport::Failed(error)
            }
        }
    }

    fn try_sync(
        &self,
        player: &dyn PlayerEntityPort,
        item: &WeaponName,
    ) -> Result<Option<String>, EntityError> {
        if !player.is_valid() {
            return Err(EntityError::Gone);
        }
        if !player.is_alive() {
            return Err(EntityError::NotAlive);
        }

        let removed = player.remove_active_item()?;
        player.give_named_item(item)?;
        Ok(removed)
    }
}
