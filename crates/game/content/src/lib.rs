//! Data-driven combat content and loaders.
//!
//! This crate houses the balance tables, weapon catalog, action catalog and
//! arena rosters, and provides loaders for their RON/TOML data files:
//! - Combat tables (TOML) → [`arena_core::CombatTables`]
//! - Weapon catalog (RON) → [`WeaponRegistry`]
//! - Action catalog (RON) → [`arena_core::ActionCatalog`]
//! - Arena roster (RON) → [`arena_core::ActorState`]s
//!
//! Content configures the simulation; it never appears in replicated state
//! except through the values copied onto actors.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionLoader, ActorLoader, ActorSpec, ContentFactory, LoadResult, TablesLoader, WeaponLoader,
    WeaponRegistry, WeaponSpec,
};
