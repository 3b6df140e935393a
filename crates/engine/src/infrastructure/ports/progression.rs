//! Progression service port.

use buylevel_domain::{Level, LevelDefinition, PlayerSlot, PointBalance, ProgressionRecord};

use super::error::ProgressionError;

// =============================================================================
// Progression Service
// =============================================================================

/// Narrow contract onto the subsystem that owns player progression.
///
/// This is the only way the engine reads or writes levels and points. The
/// service decides how records are stored; callers never see its internals
/// and must not cache a record across calls.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressionPort: Send + Sync {
    fn player_level(&self, slot: PlayerSlot) -> Result<Level, ProgressionError>;
    fn max_level(&self) -> Result<Level, ProgressionError>;
    fn is_warmup_in_progress(&self) -> Result<bool, ProgressionError>;

    /// Fresh snapshot of the slot's record, `None` if the player has none.
    fn record(&self, slot: PlayerSlot) -> Result<Option<ProgressionRecord>, ProgressionError>;

    /// Level table entry at 0-based `index`.
    fn level_definition(&self, index: usize)
        -> Result<Option<LevelDefinition>, ProgressionError>;

    fn set_record_level(&self, slot: PlayerSlot, level: Level) -> Result<(), ProgressionError>;
    fn set_record_points(
        &self,
        slot: PlayerSlot,
        points: PointBalance,
    ) -> Result<(), ProgressionError>;
}
