use crate::action::{ActionData, ValidationResponse};
use crate::combat::AttackOutcome;
use crate::state::{EntityId, Tick};

/// Result of [`super::CombatEngine::try_perform`].
#[derive(Clone, Debug, PartialEq)]
pub enum ActionAttempt {
    /// The attacker entered its combat state with this payload.
    Started(ActionData),
    /// Validation refused the attempt.
    Rejected(ValidationResponse),
    /// The action declined to take over this attempt.
    Deprioritized,
    /// The machine refused the combat state.
    Busy,
}

impl ActionAttempt {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started(_))
    }
}

/// Why the finishing-tick checkpoint refused to apply damage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterruptReason {
    /// Target no longer resolves (despawned).
    TargetLost,
    TargetDead,
    /// Target moved out of reach during windup.
    OutOfRange(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolutionOutcome {
    Landed(AttackOutcome),
    Interrupted(InterruptReason),
}

/// One action reaching its finishing tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionReport {
    pub attacker: EntityId,
    pub target: EntityId,
    pub outcome: ResolutionOutcome,
}

impl ResolutionReport {
    pub fn landed(&self) -> Option<&AttackOutcome> {
        match &self.outcome {
            ResolutionOutcome::Landed(outcome) => Some(outcome),
            ResolutionOutcome::Interrupted(_) => None,
        }
    }

    pub fn interrupted(&self) -> Option<InterruptReason> {
        match self.outcome {
            ResolutionOutcome::Landed(_) => None,
            ResolutionOutcome::Interrupted(reason) => Some(reason),
        }
    }
}

/// Everything that resolved during one fixed tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub tick: Tick,
    pub resolutions: Vec<ResolutionReport>,
    /// Actors whose hit state expired back to idle.
    pub recovered: Vec<EntityId>,
}
