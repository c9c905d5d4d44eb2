//! Action kinds and the payload of an in-flight action.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::error::{CapacityError, CombatError};
use crate::state::{EntityId, Tick};

/// Types of actions an actor can perform.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    /// Basic melee attack.
    MeleeAttack,
}

impl ActionKind {
    pub fn as_snake_case(self) -> &'static str {
        self.into()
    }
}

/// Replicated payload of one action attempt.
///
/// Created by `prepare`, owned by the attacker's combat state until that
/// state exits.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionData {
    pub kind: ActionKind,
    initiator: EntityId,
    targets: ArrayVec<EntityId, { CombatConfig::MAX_ACTION_TARGETS }>,
    prepared_at: Tick,
}

impl ActionData {
    pub fn new(kind: ActionKind, initiator: EntityId, prepared_at: Tick) -> Self {
        Self {
            kind,
            initiator,
            targets: ArrayVec::new(),
            prepared_at,
        }
    }

    /// Appends a target reference, failing when the replicated list is full.
    pub fn add_target(&mut self, target: EntityId) -> Result<(), CombatError> {
        self.targets.try_push(target).map_err(|_| {
            CapacityError::new("action targets", CombatConfig::MAX_ACTION_TARGETS).into()
        })
    }

    pub fn initiator(&self) -> EntityId {
        self.initiator
    }

    /// Primary target.
    pub fn target(&self) -> Option<EntityId> {
        self.targets.first().copied()
    }

    pub fn targets(&self) -> &[EntityId] {
        &self.targets
    }

    pub fn prepared_at(&self) -> Tick {
        self.prepared_at
    }
}
