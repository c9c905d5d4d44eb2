//! Presentation-side actor state written by the render pass.

use arrayvec::ArrayVec;
use glam::Vec3;

use super::common::Tick;
use crate::config::CombatConfig;
use crate::machine::StateId;

/// Animator triggers raised by combat presentation hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AnimTrigger {
    Attacking,
    Hit,
}

/// Optional animator attached to an actor.
///
/// Triggers queue up until the presentation layer drains them; when the
/// queue is full the oldest trigger is dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animator {
    triggers: ArrayVec<AnimTrigger, { CombatConfig::MAX_ANIM_TRIGGERS }>,
}

impl Animator {
    pub fn set_trigger(&mut self, trigger: AnimTrigger) {
        if self.triggers.is_full() {
            self.triggers.remove(0);
        }
        self.triggers.push(trigger);
    }

    pub fn pending(&self) -> &[AnimTrigger] {
        &self.triggers
    }

    pub fn drain_triggers(&mut self) -> impl Iterator<Item = AnimTrigger> + '_ {
        self.triggers.drain(..)
    }
}

/// Per-actor presentation state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorView {
    /// Planar facing direction (unit length).
    pub facing: Vec3,
    pub animator: Option<Animator>,
    /// Last machine state whose enter-render hook ran, keyed by its entry tick.
    pub presented: Option<(StateId, Tick)>,
}

impl Default for ActorView {
    fn default() -> Self {
        Self {
            facing: Vec3::Z,
            animator: None,
            presented: None,
        }
    }
}
