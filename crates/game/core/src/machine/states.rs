use glam::Vec3;

use crate::action::ActionData;
use crate::state::Name;

/// Sub-phase of an in-flight action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Windup,
    /// Active window followed by recovery.
    Active,
    Finished,
}

/// Timing progress of the current action.
///
/// `timings` holds windup, active and recovery durations in seconds. The
/// action finishes once the whole vector has elapsed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressState {
    pub timings: Vec3,
    pub elapsed: f32,
    phase: Phase,
}

impl ProgressState {
    pub fn new(timings: Vec3) -> Self {
        Self {
            timings: timings.max(Vec3::ZERO),
            elapsed: 0.0,
            phase: Phase::Windup,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn total(&self) -> f32 {
        self.timings.x + self.timings.y + self.timings.z
    }

    /// Advances by `dt` seconds. Returns true on the step that reaches
    /// [`Phase::Finished`], never again afterwards.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.is_finished() {
            return false;
        }

        self.elapsed += dt;
        self.phase = if self.elapsed >= self.total() {
            Phase::Finished
        } else if self.elapsed >= self.timings.x {
            Phase::Active
        } else {
            Phase::Windup
        };
        self.is_finished()
    }
}

/// Per-actor singleton owning the lifecycle of one in-flight action.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    /// Staged by `resolve_action`, consumed when the state activates.
    next_action: Option<(ActionData, Vec3)>,
    current: Option<ActionData>,
    pub progress: ProgressState,
}

impl CombatState {
    pub fn set_next_action(&mut self, data: ActionData, timings: Vec3) {
        self.next_action = Some((data, timings));
    }

    pub fn has_next_action(&self) -> bool {
        self.next_action.is_some()
    }

    pub fn current_action_data(&self) -> Option<&ActionData> {
        self.current.as_ref()
    }

    pub(super) fn enter(&mut self) {
        if let Some((data, timings)) = self.next_action.take() {
            self.current = Some(data);
            self.progress = ProgressState::new(timings);
        }
    }

    pub(super) fn exit(&mut self) {
        self.current = None;
        self.progress = ProgressState::default();
    }
}

/// Optional reaction state entered when damage lands.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitState {
    /// Presentation effect requested by the action that landed.
    pub hit_effect: Option<Name>,
    /// Seconds spent in the state.
    pub elapsed: f32,
}
