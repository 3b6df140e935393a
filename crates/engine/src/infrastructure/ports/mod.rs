//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - The progression service that owns levels, points and the level table
//! - The live player entity on the game host (equipment, chat)

mod entity;
mod error;
mod progression;

pub use entity::PlayerEntityPort;
pub use error::{EntityError, ProgressionError};
pub use progression::ProgressionPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use entity::MockPlayerEntityPort;

#[cfg(test)]
pub use progression::MockProgressionPort;
