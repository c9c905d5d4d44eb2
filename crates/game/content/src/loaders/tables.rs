//! Combat tables loader.

use std::path::Path;

use arena_core::CombatTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat balance tables from TOML files.
pub struct TablesLoader;

impl TablesLoader {
    /// Tables shipped with the crate (`data/tables.toml`).
    pub fn embedded() -> LoadResult<CombatTables> {
        Self::parse(include_str!("../../data/tables.toml"))
    }

    /// Load tables from a TOML file. Missing sections keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatTables> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<CombatTables> {
        let tables: CombatTables = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat tables TOML: {}", e))?;

        if tables.timing.tick_rate == 0 {
            anyhow::bail!("timing.tick_rate must be positive");
        }
        if tables.damage.strength_per_point == 0 {
            anyhow::bail!("damage.strength_per_point must be positive");
        }
        Ok(tables)
    }
}
