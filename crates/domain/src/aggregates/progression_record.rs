//! ProgressionRecord - a player's level and spendable points
//!
//! The record itself is owned by the progression service. This type is the
//! snapshot the purchase path reads through the adapter, plus the pure
//! transition that computes what a purchase writes back.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{Level, PointBalance, PurchaseCost};

/// Per-player progression state.
///
/// # Invariants
///
/// - `level >= 1` (enforced by `Level`)
/// - `points >= 0` (enforced by `PointBalance`)
/// - `level <= max level` is checked by [`ProgressionRecord::purchase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRecord {
    level: Level,
    points: PointBalance,
}

impl ProgressionRecord {
    pub fn new(level: Level, points: PointBalance) -> Self {
        Self { level, points }
    }

    /// Record for a player who just joined: level 1, no points.
    pub fn starting() -> Self {
        Self::new(Level::FIRST, PointBalance::ZERO)
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn points(&self) -> PointBalance {
        self.points
    }

    pub fn with_level(self, level: Level) -> Self {
        Self { level, ..self }
    }

    pub fn with_points(self, points: PointBalance) -> Self {
        Self { points, ..self }
    }

    /// Compute the record after buying one level for `cost`.
    ///
    /// # Errors
    ///
    /// - `DomainError::LevelOutOfRange` if the record is already at `max`
    /// - `DomainError::InsufficientPoints` if the balance does not cover `cost`
    pub fn purchase(&self, cost: PurchaseCost, max: Level) -> Result<PurchasedRecord, DomainError> {
        let next_level = self
            .level
            .next_within(max)
            .ok_or_else(|| DomainError::level_out_of_range(self.level.value() + 1, max.value()))?;
        let remaining = self.points.debit(cost)?;

        Ok(PurchasedRecord {
            before: *self,
            after: Self::new(next_level, remaining),
            cost,
        })
    }
}

impl Default for ProgressionRecord {
    fn default() -> Self {
        Self::starting()
    }
}

/// Before/after pair produced by a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchasedRecord {
    pub before: ProgressionRecord,
    pub after: ProgressionRecord,
    pub cost: PurchaseCost,
}
