//! Weapon catalog loader.

use std::collections::HashMap;
use std::path::Path;

use arena_core::glam::Vec3;
use arena_core::{ElementalAlignment, Weapon, name};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Weapon entry as written in RON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub name: String,
    pub element: ElementalAlignment,
    pub range: f32,
    /// Windup, active and recovery seconds.
    pub timings: (f32, f32, f32),
}

impl WeaponSpec {
    pub fn to_weapon(&self) -> LoadResult<Weapon> {
        if self.range <= 0.0 {
            anyhow::bail!("weapon '{}' has non-positive range {}", self.name, self.range);
        }
        let (windup, active, recovery) = self.timings;
        if windup < 0.0 || active < 0.0 || recovery < 0.0 {
            anyhow::bail!("weapon '{}' has negative timings", self.name);
        }

        Ok(Weapon::new(
            name(&self.name)?,
            self.element,
            self.range,
            Vec3::new(windup, active, recovery),
        ))
    }
}

/// Loader for weapon catalogs from RON files.
pub struct WeaponLoader;

impl WeaponLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<WeaponSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<WeaponSpec>> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))
    }
}

/// Weapons by name.
#[derive(Debug, Clone, Default)]
pub struct WeaponRegistry {
    weapons: HashMap<String, Weapon>,
}

impl WeaponRegistry {
    /// Loads the weapon catalog embedded in the crate (`data/weapons.ron`).
    pub fn load() -> LoadResult<Self> {
        let specs = WeaponLoader::parse(include_str!("../../data/weapons.ron"))?;
        Self::from_specs(&specs)
    }

    pub fn from_specs(specs: &[WeaponSpec]) -> LoadResult<Self> {
        let mut weapons = HashMap::with_capacity(specs.len());
        for spec in specs {
            if weapons.insert(spec.name.clone(), spec.to_weapon()?).is_some() {
                anyhow::bail!("duplicate weapon '{}'", spec.name);
            }
        }
        Ok(Self { weapons })
    }

    pub fn get(&self, name: &str) -> Option<&Weapon> {
        self.weapons.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.weapons.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_loads() {
        let registry = WeaponRegistry::load().expect("Failed to load weapons");
        assert!(registry.len() >= 5);

        let blade = registry.get("ember_blade").unwrap();
        assert_eq!(blade.attack_element, ElementalAlignment::Fire);
        assert_eq!(blade.range, 1.5);
        assert_eq!(blade.anim_timings, Vec3::new(0.35, 0.1, 0.2));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let specs = WeaponLoader::parse(
            r#"[
                (name: "a", element: Fire, range: 1.0, timings: (0.1, 0.1, 0.1)),
                (name: "a", element: Air, range: 1.0, timings: (0.1, 0.1, 0.1)),
            ]"#,
        )
        .unwrap();
        let err = WeaponRegistry::from_specs(&specs).unwrap_err();
        assert!(err.to_string().contains("duplicate weapon 'a'"));
    }

    #[test]
    fn names_longer_than_replicated_capacity_fail() {
        let spec = WeaponSpec {
            name: "a".repeat(64),
            element: ElementalAlignment::Neutral,
            range: 1.0,
            timings: (0.1, 0.1, 0.1),
        };
        assert!(spec.to_weapon().is_err());
    }
}
