//! Content loaders for reading combat data from files.
//!
//! Each loader has a `parse` entry point for in-memory text and a `load`
//! entry point for files; the embedded defaults under `data/` go through
//! the same parsers.

pub mod actions;
pub mod actors;
pub mod factory;
pub mod tables;
pub mod weapons;

pub use actions::ActionLoader;
pub use actors::{ActorLoader, ActorSpec};
pub use factory::ContentFactory;
pub use tables::TablesLoader;
pub use weapons::{WeaponLoader, WeaponRegistry, WeaponSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
