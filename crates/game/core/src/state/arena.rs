use std::collections::BTreeMap;

use super::actor::ActorState;
use super::common::{EntityId, Tick};
use super::resources::TrackedResources;
use crate::action::ActionData;

/// Root simulation state.
///
/// Actors are kept in id order so every participant iterates them identically.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arena {
    actors: BTreeMap<EntityId, ActorState>,
    /// Current fixed tick.
    pub clock: Tick,
    /// Resolution counter, mixed into every random seed.
    pub nonce: u64,
    pub resources: TrackedResources,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an actor, replacing any previous actor with the same id.
    pub fn spawn(&mut self, actor: ActorState) -> Option<ActorState> {
        self.actors.insert(actor.id, actor)
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<ActorState> {
        self.actors.remove(&id)
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.values()
    }

    /// Actor ids in deterministic order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.actors.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Resolves the actor that initiated an action.
    pub fn get_active(&self, data: &ActionData) -> Option<&ActorState> {
        self.actor(data.initiator())
    }

    /// Resolves the primary target of an action, if it is still spawned.
    pub fn get_target(&self, data: &ActionData) -> Option<&ActorState> {
        data.target().and_then(|id| self.actor(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKind;

    #[test]
    fn resolves_action_references() {
        let mut arena = Arena::new();
        arena.spawn(ActorState::builder(EntityId(1)).build());
        arena.spawn(ActorState::builder(EntityId(2)).build());

        let mut data = ActionData::new(ActionKind::MeleeAttack, EntityId(1), Tick(3));
        data.add_target(EntityId(2)).unwrap();

        assert_eq!(arena.get_active(&data).map(|a| a.id), Some(EntityId(1)));
        assert_eq!(arena.get_target(&data).map(|a| a.id), Some(EntityId(2)));

        arena.despawn(EntityId(2));
        assert!(arena.get_target(&data).is_none());
    }

    #[test]
    fn ids_are_sorted() {
        let mut arena = Arena::new();
        for id in [5, 1, 3] {
            arena.spawn(ActorState::builder(EntityId(id)).build());
        }
        assert_eq!(arena.ids(), vec![EntityId(1), EntityId(3), EntityId(5)]);
    }
}
