//! BuyLevel domain types.
//!
//! Pure value objects and invariants for weapon-progression purchases.
//! Nothing here talks to a game host or a progression service; those live
//! behind ports in the engine crate.

pub mod aggregates;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{ProgressionRecord, PurchasedRecord};
pub use error::DomainError;
pub use ids::PlayerSlot;
pub use value_objects::{
    Level, LevelDefinition, PointBalance, PurchaseCost, RestrictedLevelPolicy, WeaponName,
    DEFAULT_RESTRICTED_PATTERNS,
};
