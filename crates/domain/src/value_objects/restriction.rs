//! Restricted-level policy.
//!
//! Some levels (grenade, knife) are meant to be earned, not bought. A
//! purchase may never leave such a level, and optionally may never land on
//! one either.

use serde::{Deserialize, Serialize};

use crate::value_objects::WeaponName;

/// Item-name fragments that mark a level as restricted on a stock server.
pub const DEFAULT_RESTRICTED_PATTERNS: &[&str] = &["hegrenade", "knife"];

/// Predicate over item names identifying levels closed to purchases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictedLevelPolicy {
    patterns: Vec<String>,
    #[serde(default)]
    guard_entry: bool,
}

impl RestrictedLevelPolicy {
    /// Build a policy from substring patterns. Matching ignores ASCII case;
    /// blank patterns are dropped.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            patterns,
            guard_entry: false,
        }
    }

    /// Also refuse purchases whose target level is restricted.
    pub fn with_entry_guard(mut self, guard_entry: bool) -> Self {
        self.guard_entry = guard_entry;
        self
    }

    /// A policy that restricts nothing.
    pub fn unrestricted() -> Self {
        Self::new(std::iter::empty::<&str>())
    }

    pub fn is_restricted(&self, weapon: &WeaponName) -> bool {
        let name = weapon.as_str().to_ascii_lowercase();
        self.patterns.iter().any(|p| name.contains(p.as_str()))
    }

    pub fn guards_entry(&self) -> bool {
        self.guard_entry
    }

    /// Whether buying into `target` is forbidden under this policy.
    pub fn blocks_entry_into(&self, target: &WeaponName) -> bool {
        self.guard_entry && self.is_restricted(target)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for RestrictedLevelPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RESTRICTED_PATTERNS)
    }
}
