//! Content factory for loading every combat data file from one directory.

use std::path::PathBuf;

use arena_core::{ActionCatalog, ActorState, CombatTables};

use crate::loaders::{
    ActionLoader, ActorLoader, LoadResult, TablesLoader, WeaponLoader, WeaponRegistry,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── tables.toml
/// ├── weapons.ron
/// ├── actions.ron
/// └── arena.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory of the data files shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    pub fn load_tables(&self) -> LoadResult<CombatTables> {
        TablesLoader::load(&self.data_dir.join("tables.toml"))
    }

    pub fn load_weapons(&self) -> LoadResult<WeaponRegistry> {
        let specs = WeaponLoader::load(&self.data_dir.join("weapons.ron"))?;
        WeaponRegistry::from_specs(&specs)
    }

    pub fn load_actions(&self) -> LoadResult<ActionCatalog> {
        ActionLoader::load(&self.data_dir.join("actions.ron"))
    }

    /// Loads the arena roster, resolving weapons through `weapons`.
    pub fn load_actors(&self, weapons: &WeaponRegistry) -> LoadResult<Vec<ActorState>> {
        ActorLoader::load(&self.data_dir.join("arena.ron"), weapons)
    }
}
