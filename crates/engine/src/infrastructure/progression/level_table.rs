//! Level table: the ordered list of weapons a match progresses through.

use std::path::Path;

use buylevel_domain::{DomainError, Level, LevelDefinition, WeaponName};

/// Weapon order used when no table file is configured.
pub const DEFAULT_WEAPON_ORDER: &[&str] = &[
    "weapon_glock",
    "weapon_usp_silencer",
    "weapon_p250",
    "weapon_deagle",
    "weapon_mac10",
    "weapon_mp9",
    "weapon_ump45",
    "weapon_p90",
    "weapon_galilar",
    "weapon_famas",
    "weapon_ak47",
    "weapon_m4a1",
    "weapon_sg556",
    "weapon_aug",
    "weapon_awp",
    "weapon_negev",
    "weapon_hegrenade",
    "weapon_knife",
];

#[derive(Debug, thiserror::Error)]
pub enum LevelTableError {
    #[error("Failed to read level table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse level table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid level table: {0}")]
    Invalid(#[from] DomainError),
}

/// Immutable for the lifetime of a match. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    weapons: Vec<WeaponName>,
}

impl LevelTable {
    pub fn new(weapons: Vec<WeaponName>) -> Result<Self, DomainError> {
        if weapons.is_empty() {
            return Err(DomainError::validation("Level table needs at least one level"));
        }
        Ok(Self { weapons })
    }

    pub fn from_names<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let weapons = names
            .into_iter()
            .map(WeaponName::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(weapons)
    }

    /// Parse a JSON array of weapon classnames.
    pub fn from_json_str(json: &str) -> Result<Self, LevelTableError> {
        let weapons: Vec<WeaponName> = serde_json::from_str(json)?;
        Ok(Self::new(weapons)?)
    }

    pub fn load(path: &Path) -> Result<Self, LevelTableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn max_level(&self) -> Level {
        Level::from_table_index(self.weapons.len() - 1)
    }

    pub fn definition(&self, index: usize) -> Option<LevelDefinition> {
        self.weapons
            .get(index)
            .map(|weapon| LevelDefinition::new(index, weapon.clone()))
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            weapons: DEFAULT_WEAPON_ORDER
                .iter()
                .filter_map(|name| WeaponName::new(*name).ok())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_table_ends_on_grenade_then_knife() {
        let table = LevelTable::default();
        assert_eq!(table.len(), DEFAULT_WEAPON_ORDER.len());
        assert_eq!(table.max_level().value(), 18);
        let last = table.definition(17).unwrap();
        assert_eq!(last.item_name().as_str(), "weapon_knife");
        assert_eq!(last.level().value(), 18);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(LevelTable::from_names(Vec::<String>::new()).is_err());
        assert!(matches!(
            LevelTable::from_json_str("[]"),
            Err(LevelTableError::Invalid(_))
        ));
    }

    #[test]
    fn definition_past_end_is_none() {
        let table = LevelTable::from_names(["weapon_glock", "weapon_awp"]).unwrap();
        assert!(table.definition(2).is_none());
        assert_eq!(table.max_level().value(), 2);
    }

    #[test]
    fn bad_weapon_name_in_json_is_a_parse_error() {
        assert!(matches!(
            LevelTable::from_json_str(r#"["weapon_glock", ""]"#),
            Err(LevelTableError::Parse(_))
        ));
    }

    #[test]
    fn loads_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["weapon_glock", "weapon_deagle", "weapon_knife"]"#).unwrap();

        let table = LevelTable::load(file.path()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.definition(1).unwrap().item_name().as_str(),
            "weapon_deagle"
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = LevelTable::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(LevelTableError::Io(_))));
    }
}
