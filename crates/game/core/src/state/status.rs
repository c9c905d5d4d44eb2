//! Named status effects attached to actors.
//!
//! Effects are queried by name rather than by type, so new effects need only a
//! new name (and optionally a row in the status modifier table).
//!
//! # Tick-based Duration
//!
//! Effects store `expires_at: Tick`; an effect is active while
//! `current_tick < expires_at`.

use arrayvec::ArrayVec;

use super::common::{Name, Tick};
use crate::config::CombatConfig;
use crate::error::CapacityError;

/// Active status effects on an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

/// A single named effect with expiration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub name: Name,
    pub expires_at: Tick,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if an effect with `name` is active at the given tick.
    pub fn has(&self, name: &str, current_tick: Tick) -> bool {
        self.effects
            .iter()
            .any(|e| e.name.as_str() == name && e.expires_at > current_tick)
    }

    /// Gets the expiration tick of an active effect.
    pub fn expires_at(&self, name: &str, current_tick: Tick) -> Option<Tick> {
        self.effects
            .iter()
            .find(|e| e.name.as_str() == name && e.expires_at > current_tick)
            .map(|e| e.expires_at)
    }

    /// Adds an effect, or extends an existing one to the later expiration.
    ///
    /// Fails without modifying the set when a new effect would exceed
    /// [`CombatConfig::MAX_STATUS_EFFECTS`].
    pub fn add(&mut self, name: Name, expires_at: Tick) -> Result<(), CapacityError> {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.name == name) {
            existing.expires_at = existing.expires_at.max(expires_at);
            return Ok(());
        }

        self.effects
            .try_push(StatusEffect { name, expires_at })
            .map_err(|_| CapacityError::new("status effects", CombatConfig::MAX_STATUS_EFFECTS))
    }

    pub fn remove(&mut self, name: &str) {
        self.effects.retain(|e| e.name.as_str() != name);
    }

    /// Removes all effects that expired at or before the current tick.
    pub fn remove_expired(&mut self, current_tick: Tick) {
        self.effects.retain(|e| e.expires_at > current_tick);
    }

    pub fn active_at(&self, current_tick: Tick) -> impl Iterator<Item = &StatusEffect> + '_ {
        self.effects
            .iter()
            .filter(move |e| e.expires_at > current_tick)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::name;

    #[test]
    fn effect_is_active_until_expiry() {
        let mut effects = StatusEffects::empty();
        effects.add(name("dreamweave").unwrap(), Tick(10)).unwrap();

        assert!(effects.has("dreamweave", Tick(9)));
        assert!(!effects.has("dreamweave", Tick(10)));
        assert!(!effects.has("burning", Tick(0)));
    }

    #[test]
    fn re_adding_extends_to_later_expiry() {
        let mut effects = StatusEffects::empty();
        effects.add(name("dreamweave").unwrap(), Tick(10)).unwrap();
        effects.add(name("dreamweave").unwrap(), Tick(5)).unwrap();
        assert_eq!(effects.expires_at("dreamweave", Tick(0)), Some(Tick(10)));

        effects.add(name("dreamweave").unwrap(), Tick(20)).unwrap();
        assert_eq!(effects.expires_at("dreamweave", Tick(0)), Some(Tick(20)));
        assert_eq!(effects.iter().count(), 1);
    }

    #[test]
    fn append_fails_when_full() {
        let mut effects = StatusEffects::empty();
        for i in 0..CombatConfig::MAX_STATUS_EFFECTS {
            effects
                .add(name(&format!("effect-{i}")).unwrap(), Tick(100))
                .unwrap();
        }

        let err = effects.add(name("overflow").unwrap(), Tick(100)).unwrap_err();
        assert_eq!(err.capacity, CombatConfig::MAX_STATUS_EFFECTS);
        assert!(!effects.has("overflow", Tick(0)));
    }

    #[test]
    fn expired_effects_are_pruned() {
        let mut effects = StatusEffects::empty();
        effects.add(name("short").unwrap(), Tick(2)).unwrap();
        effects.add(name("long").unwrap(), Tick(50)).unwrap();

        effects.remove_expired(Tick(2));
        assert_eq!(effects.active_at(Tick(2)).count(), 1);
        assert!(effects.has("long", Tick(2)));
    }
}
