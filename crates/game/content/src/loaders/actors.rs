//! Arena roster loader.

use std::path::Path;

use arena_core::glam::Vec3;
use arena_core::{ActorState, Armour, Capabilities, Energy, EntityId, StatLine};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, WeaponRegistry, read_file};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySpec {
    pub max: f32,
    pub recharge_rate: f32,
}

/// Actor entry as written in RON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSpec {
    pub id: u32,
    pub position: (f32, f32, f32),
    pub health: f32,
    #[serde(default = "Armour::none")]
    pub armour: Armour,
    #[serde(default)]
    pub stats: StatLine,
    pub energy: EnergySpec,
    /// Name in the weapon registry.
    pub weapon: String,
    /// Capability flag names, case-insensitive.
    pub capabilities: Vec<String>,
}

impl ActorSpec {
    pub fn to_actor(&self, weapons: &WeaponRegistry) -> LoadResult<ActorState> {
        let weapon = weapons.get(&self.weapon).copied().ok_or_else(|| {
            anyhow::anyhow!("actor {} uses unknown weapon '{}'", self.id, self.weapon)
        })?;

        let mut capabilities = Capabilities::empty();
        for flag in &self.capabilities {
            capabilities |= Capabilities::from_name(&flag.to_uppercase()).ok_or_else(|| {
                anyhow::anyhow!("actor {} has unknown capability '{}'", self.id, flag)
            })?;
        }

        let (x, y, z) = self.position;
        Ok(ActorState::builder(EntityId(self.id))
            .position(Vec3::new(x, y, z))
            .health(self.health)
            .armour(self.armour)
            .stats(self.stats)
            .energy(Energy::new(self.energy.max, self.energy.recharge_rate))
            .weapon(weapon)
            .capabilities(capabilities)
            .build())
    }
}

/// Loader for arena rosters from RON files.
pub struct ActorLoader;

impl ActorLoader {
    /// Roster shipped with the crate (`data/arena.ron`).
    pub fn embedded(weapons: &WeaponRegistry) -> LoadResult<Vec<ActorState>> {
        Self::parse(include_str!("../../data/arena.ron"), weapons)
    }

    pub fn load(path: &Path, weapons: &WeaponRegistry) -> LoadResult<Vec<ActorState>> {
        let content = read_file(path)?;
        Self::parse(&content, weapons)
    }

    pub fn parse(content: &str, weapons: &WeaponRegistry) -> LoadResult<Vec<ActorState>> {
        let specs: Vec<ActorSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse arena roster RON: {}", e))?;
        specs.iter().map(|spec| spec.to_actor(weapons)).collect()
    }
}
