//! Value objects for the progression domain.

mod progression;
mod restriction;
mod weapon;

pub use progression::{Level, PointBalance, PurchaseCost};
pub use restriction::{RestrictedLevelPolicy, DEFAULT_RESTRICTED_PATTERNS};
pub use weapon::{LevelDefinition, WeaponName};
