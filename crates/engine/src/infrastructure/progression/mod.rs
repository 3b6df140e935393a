//! Progression service adapters.

mod in_memory;
mod level_table;

pub use in_memory::InMemoryProgression;
pub use level_table::{LevelTable, LevelTableError, DEFAULT_WEAPON_ORDER};
