//! Weapon names and level-table entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::Level;

/// Maximum length for an item classname (e.g. `weapon_deagle`)
const MAX_WEAPON_NAME_LENGTH: usize = 64;

// ============================================================================
// WeaponName
// ============================================================================

/// A validated item classname granted by a level (non-empty, <=64 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeaponName(String);

impl WeaponName {
    /// Create a new validated weapon name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 64 characters after trimming
    /// - The name contains whitespace
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Weapon name cannot be empty"));
        }
        if trimmed.len() > MAX_WEAPON_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Weapon name cannot exceed {} characters",
                MAX_WEAPON_NAME_LENGTH
            )));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::validation(format!(
                "Weapon name cannot contain whitespace: {}",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display name without the engine's `weapon_` prefix.
    pub fn short_name(&self) -> &str {
        self.0.strip_prefix("weapon_").unwrap_or(&self.0)
    }
}

impl fmt::Display for WeaponName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for WeaponName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<WeaponName> for String {
    fn from(name: WeaponName) -> String {
        name.0
    }
}

// ============================================================================
// LevelDefinition
// ============================================================================

/// One entry of the level table: the item granted at a level.
///
/// `index` is the 0-based storage position; the level it describes is
/// `index + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    index: usize,
    item_name: WeaponName,
}

impl LevelDefinition {
    pub fn new(index: usize, item_name: WeaponName) -> Self {
        Self { index, item_name }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn level(&self) -> Level {
        Level::from_table_index(self.index)
    }

    pub fn item_name(&self) -> &WeaponName {
        &self.item_name
    }

    pub fn into_item_name(self) -> WeaponName {
        self.item_name
    }
}
