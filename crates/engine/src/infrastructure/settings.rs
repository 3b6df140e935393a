//! Purchase and host configuration.
//!
//! Settings come from environment variables (optionally seeded from a
//! `.env` file at the repo root). Every key has a stock default, so an empty
//! environment yields a server that charges 10 kills per level and refuses
//! purchases on grenade and knife levels.

use std::path::PathBuf;

use buylevel_domain::{PurchaseCost, RestrictedLevelPolicy, DEFAULT_RESTRICTED_PATTERNS};
use serde::{Deserialize, Serialize};

pub const ENV_COST_PER_LEVEL: &str = "BUYLEVEL_COST_PER_LEVEL";
pub const ENV_RESTRICTED_PATTERNS: &str = "BUYLEVEL_RESTRICTED_PATTERNS";
pub const ENV_GUARD_RESTRICTED_ENTRY: &str = "BUYLEVEL_GUARD_RESTRICTED_ENTRY";
pub const ENV_VERIFY_NEXT_ITEM: &str = "BUYLEVEL_VERIFY_NEXT_ITEM";
pub const ENV_COMMAND: &str = "BUYLEVEL_COMMAND";
pub const ENV_LEVEL_TABLE: &str = "BUYLEVEL_LEVEL_TABLE";
pub const ENV_PROGRESSION: &str = "BUYLEVEL_PROGRESSION";

const DEFAULT_COMMAND: &str = "css_buylevel";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl SettingsError {
    fn invalid(key: &'static str, message: impl ToString) -> Self {
        Self::Invalid {
            key,
            message: message.to_string(),
        }
    }
}

// ============================================================================
// Purchase Settings
// ============================================================================

/// Rules applied to every level purchase. Read once at plugin load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseSettings {
    #[serde(default)]
    pub cost_per_level: PurchaseCost,
    #[serde(default = "default_restricted_patterns")]
    pub restricted_patterns: Vec<String>,
    /// Also refuse purchases that would land on a restricted level.
    #[serde(default)]
    pub guard_restricted_entry: bool,
    /// Look up the next level's item before debiting, so a gap in the level
    /// table rejects the purchase instead of committing it without an item.
    #[serde(default)]
    pub verify_next_item_before_debit: bool,
    #[serde(default = "default_command")]
    pub command_name: String,
}

fn default_restricted_patterns() -> Vec<String> {
    DEFAULT_RESTRICTED_PATTERNS
        .iter()
        .map(|p| (*p).to_string())
        .collect()
}

fn default_command() -> String {
    DEFAULT_COMMAND.to_string()
}

impl Default for PurchaseSettings {
    fn default() -> Self {
        Self {
            cost_per_level: PurchaseCost::default(),
            restricted_patterns: default_restricted_patterns(),
            guard_restricted_entry: false,
            verify_next_item_before_debit: false,
            command_name: default_command(),
        }
    }
}

impl PurchaseSettings {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut settings = Self::default();

        if let Some(raw) = get(ENV_COST_PER_LEVEL) {
            let points: u32 = raw
                .parse()
                .map_err(|e| SettingsError::invalid(ENV_COST_PER_LEVEL, e))?;
            settings.cost_per_level = PurchaseCost::new(points)
                .map_err(|e| SettingsError::invalid(ENV_COST_PER_LEVEL, e))?;
        }
        if let Some(raw) = get(ENV_RESTRICTED_PATTERNS) {
            settings.restricted_patterns = raw
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(raw) = get(ENV_GUARD_RESTRICTED_ENTRY) {
            settings.guard_restricted_entry = parse_flag(ENV_GUARD_RESTRICTED_ENTRY, &raw)?;
        }
        if let Some(raw) = get(ENV_VERIFY_NEXT_ITEM) {
            settings.verify_next_item_before_debit = parse_flag(ENV_VERIFY_NEXT_ITEM, &raw)?;
        }
        if let Some(raw) = get(ENV_COMMAND) {
            if raw.chars().any(char::is_whitespace) {
                return Err(SettingsError::invalid(
                    ENV_COMMAND,
                    "command name cannot contain whitespace",
                ));
            }
            settings.command_name = raw;
        }

        Ok(settings)
    }

    pub fn restricted_policy(&self) -> RestrictedLevelPolicy {
        RestrictedLevelPolicy::new(&self.restricted_patterns)
            .with_entry_guard(self.guard_restricted_entry)
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, SettingsError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(SettingsError::invalid(
            key,
            format!("expected true/false, got '{}'", other),
        )),
    }
}

// ============================================================================
// Host Settings
// ============================================================================

/// Settings for the console host that stands in for a game server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostSettings {
    /// JSON array of item classnames, one per level.
    pub level_table_path: Option<PathBuf>,
    /// When false the host starts without a progression service.
    pub progression_enabled: bool,
}

impl HostSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let level_table_path = lookup(ENV_LEVEL_TABLE)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let progression_enabled = match lookup(ENV_PROGRESSION) {
            None => true,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "" | "enabled" => true,
                "disabled" => false,
                other => {
                    return Err(SettingsError::invalid(
                        ENV_PROGRESSION,
                        format!("expected enabled/disabled, got '{}'", other),
                    ))
                }
            },
        };

        Ok(Self {
            level_table_path,
            progression_enabled,
        })
    }
}
