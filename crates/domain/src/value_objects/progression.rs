//! Level, point balance, and purchase cost value objects.
//!
//! Levels are 1-based everywhere a player can see them. The level table is
//! 0-based storage, so conversions between the two go through
//! [`Level::table_index`] and [`Level::from_table_index`] and nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

// ============================================================================
// Level
// ============================================================================

/// A weapon-progression level (always >= 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Level(u32);

impl Level {
    /// The level every player starts a match on.
    pub const FIRST: Level = Level(1);

    /// Create a validated level.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `value` is zero.
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::validation("Level must be at least 1"));
        }
        Ok(Self(value))
    }

    /// Level stored at `index` in a 0-based level table.
    pub fn from_table_index(index: usize) -> Self {
        Self(u32::try_from(index).map_or(u32::MAX, |i| i.saturating_add(1)))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Index of this level's definition in the 0-based level table.
    pub fn table_index(&self) -> usize {
        (self.0 - 1) as usize
    }

    /// The level directly above this one, if it does not pass `max`.
    pub fn next_within(&self, max: Level) -> Option<Level> {
        let next = self.0.checked_add(1)?;
        (next <= max.0).then_some(Level(next))
    }

    pub fn is_at_least(&self, other: Level) -> bool {
        self.0 >= other.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Level {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> u32 {
        level.0
    }
}

// ============================================================================
// PointBalance
// ============================================================================

/// Spendable progress ("kill points") accumulated by a player.
///
/// Unsigned storage keeps the balance non-negative by construction.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PointBalance(u32);

impl PointBalance {
    pub const ZERO: PointBalance = PointBalance(0);

    pub fn new(points: u32) -> Self {
        Self(points)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn covers(&self, cost: PurchaseCost) -> bool {
        self.0 >= cost.value()
    }

    /// Balance left after paying `cost`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientPoints` when the balance is short.
    pub fn debit(&self, cost: PurchaseCost) -> Result<PointBalance, DomainError> {
        self.0
            .checked_sub(cost.value())
            .map(PointBalance)
            .ok_or_else(|| DomainError::insufficient_points(self.0, cost.value()))
    }

    pub fn credit(&self, points: u32) -> PointBalance {
        PointBalance(self.0.saturating_add(points))
    }
}

impl fmt::Display for PointBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PointBalance {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// ============================================================================
// PurchaseCost
// ============================================================================

/// Points charged for one purchased level. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PurchaseCost(u32);

impl PurchaseCost {
    /// Kills required to buy a level on a stock server.
    pub const DEFAULT: PurchaseCost = PurchaseCost(10);

    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `points` is zero.
    pub fn new(points: u32) -> Result<Self, DomainError> {
        if points == 0 {
            return Err(DomainError::validation(
                "Purchase cost must be at least 1 point",
            ));
        }
        Ok(Self(points))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for PurchaseCost {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PurchaseCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for PurchaseCost {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PurchaseCost> for u32 {
    fn from(cost: PurchaseCost) -> u32 {
        cost.0
    }
}
