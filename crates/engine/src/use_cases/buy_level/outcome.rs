//! Purchase outcomes and the player-facing text for each.

use buylevel_domain::{Level, PointBalance, PurchaseCost, WeaponName};

use crate::infrastructure::ports::EntityError;

/// Result of one purchase attempt.
///
/// Every failure path is a variant rather than an error so that callers
/// always get a message to show the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Points debited, level raised, new weapon resolved.
    Success(PurchaseReceipt),
    /// Points debited and level raised, but the new level has no item in the
    /// level table so nothing was equipped.
    CommittedWithoutItem {
        new_level: Level,
        new_balance: PointBalance,
        cost: PurchaseCost,
    },
    Invalid(InvalidPlayer),
    ServiceUnavailable,
    Rejected(Rejection),
    DataMissing(MissingData),
    InsufficientPoints {
        have: u32,
        need: u32,
    },
    /// The progression service failed mid-call; details are in the log.
    Fault {
        operation: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPlayer {
    NoPlayer,
    NotAlive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Warmup,
    MaxLevel,
    RestrictedLevel { weapon: WeaponName },
    RestrictedTarget { weapon: WeaponName },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingData {
    Record,
    /// The service could not report the size of the level table.
    LevelTable,
    LevelDefinition { level: Level },
}

/// What a successful purchase changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub old_level: Level,
    pub new_level: Level,
    pub old_balance: PointBalance,
    pub new_balance: PointBalance,
    pub cost: PurchaseCost,
    pub weapon: WeaponName,
    pub equipment: EquipmentReport,
}

/// How the equipment swap after a purchase went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipmentReport {
    Equipped { removed: Option<String> },
    Failed(EntityError),
}

impl EquipmentReport {
    pub fn is_equipped(&self) -> bool {
        matches!(self, Self::Equipped { .. })
    }
}

impl PurchaseOutcome {
    /// Whether points and level were written.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Success(_) | Self::CommittedWithoutItem { .. })
    }

    pub fn receipt(&self) -> Option<&PurchaseReceipt> {
        match self {
            Self::Success(receipt) => Some(receipt),
            _ => None,
        }
    }

    /// Chat line for the player. Distinct for every condition.
    pub fn player_message(&self) -> String {
        match self {
            Self::Success(receipt) => {
                let mut message = format!(
                    "You spent {} kills to upgrade to level {} ({})!",
                    receipt.cost,
                    receipt.new_level,
                    receipt.weapon.short_name()
                );
                if let EquipmentReport::Failed(reason) = &receipt.equipment {
                    message.push_str(&format!(" Your weapon could not be swapped: {}.", reason));
                }
                message
            }
            Self::CommittedWithoutItem { new_level, .. } => format!(
                "You bought level {}, but its weapon is missing from the level list. Please tell an admin.",
                new_level
            ),
            Self::Invalid(InvalidPlayer::NoPlayer) => {
                "Only connected players can buy levels.".to_string()
            }
            Self::Invalid(InvalidPlayer::NotAlive) => {
                "You must be alive to buy a level.".to_string()
            }
            Self::ServiceUnavailable => "Error: GunGame API is not available.".to_string(),
            Self::Rejected(Rejection::Warmup) => "You cannot buy levels during warmup.".to_string(),
            Self::Rejected(Rejection::MaxLevel) => {
                "You are already at the maximum level.".to_string()
            }
            Self::Rejected(Rejection::RestrictedLevel { weapon }) => format!(
                "You cannot buy levels while on the {} level.",
                weapon.short_name()
            ),
            Self::Rejected(Rejection::RestrictedTarget { weapon }) => format!(
                "The next level ({}) must be earned, it cannot be bought.",
                weapon.short_name()
            ),
            Self::DataMissing(MissingData::Record) => "Error: Player data not found.".to_string(),
            Self::DataMissing(MissingData::LevelTable) => {
                "Error: The level list is not available.".to_string()
            }
            Self::DataMissing(MissingData::LevelDefinition { level }) => {
                format!("Error: Weapon data for level {} is missing.", level)
            }
            Self::InsufficientPoints { have, need } => format!(
                "You need {} kills to buy a level. You have {} kills.",
                need, have
            ),
            Self::Fault { .. } => "An error occurred while buying a level.".to_string(),
        }
    }
}
