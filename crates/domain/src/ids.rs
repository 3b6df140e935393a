use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Connection slot of a player for the duration of a match.
///
/// Slots are handed out by the game host; the domain never allocates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerSlot(u32);

impl PlayerSlot {
    pub fn new(slot: u32) -> Self {
        Self(slot)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PlayerSlot {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<PlayerSlot> for u32 {
    fn from(value: PlayerSlot) -> Self {
        value.0
    }
}

impl FromStr for PlayerSlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| DomainError::parse(format!("Invalid player slot: {}", s)))
    }
}
