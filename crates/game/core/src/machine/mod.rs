//! Per-actor state machine.
//!
//! ```text
//! Idle ──try_perform──► Combat(Windup → Active → Finished) ──► Idle
//!   ▲
//!   └──── hit_duration ──── Hit ◄── damage lands (forced restart)
//! ```
//!
//! The active state is an explicit [`StateId`] tag checked by value. Each
//! concrete state is stored inline and reachable through the typed
//! [`StateMachine::get_state`] lookup whether or not it is active.
mod states;

pub use states::{CombatState, HitState, Phase, ProgressState};

use crate::state::Tick;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateId {
    #[default]
    Idle,
    Combat,
    Hit,
}

/// Marker state: the actor is free to start an action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdleState;

/// Typed access to a concrete state stored in the machine.
pub trait MachineState: Sized {
    const ID: StateId;

    fn lookup(machine: &StateMachine) -> Option<&Self>;
    fn lookup_mut(machine: &mut StateMachine) -> Option<&mut Self>;
}

impl MachineState for IdleState {
    const ID: StateId = StateId::Idle;

    fn lookup(machine: &StateMachine) -> Option<&Self> {
        Some(&machine.idle)
    }

    fn lookup_mut(machine: &mut StateMachine) -> Option<&mut Self> {
        Some(&mut machine.idle)
    }
}

impl MachineState for CombatState {
    const ID: StateId = StateId::Combat;

    fn lookup(machine: &StateMachine) -> Option<&Self> {
        Some(&machine.combat)
    }

    fn lookup_mut(machine: &mut StateMachine) -> Option<&mut Self> {
        Some(&mut machine.combat)
    }
}

impl MachineState for HitState {
    const ID: StateId = StateId::Hit;

    fn lookup(machine: &StateMachine) -> Option<&Self> {
        machine.hit.as_ref()
    }

    fn lookup_mut(machine: &mut StateMachine) -> Option<&mut Self> {
        machine.hit.as_mut()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateMachine {
    active: StateId,
    entered_at: Tick,
    idle: IdleState,
    combat: CombatState,
    hit: Option<HitState>,
}

impl StateMachine {
    /// Machine with Idle and Combat states and no hit state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hit_state(mut self) -> Self {
        self.hit = Some(HitState::default());
        self
    }

    /// Installs or removes the hit state. Removing it while active falls back to Idle.
    pub fn set_hit_state(&mut self, hit: Option<HitState>) {
        if hit.is_none() && self.active == StateId::Hit {
            self.active = StateId::Idle;
        }
        self.hit = hit;
    }

    pub fn active_state(&self) -> StateId {
        self.active
    }

    pub fn is_active<T: MachineState>(&self) -> bool {
        self.active == T::ID
    }

    /// Tick on which the active state was entered.
    pub fn entered_at(&self) -> Tick {
        self.entered_at
    }

    pub fn get_state<T: MachineState>(&self) -> Option<&T> {
        T::lookup(self)
    }

    pub fn get_state_mut<T: MachineState>(&mut self) -> Option<&mut T> {
        T::lookup_mut(self)
    }

    pub fn combat_state(&self) -> &CombatState {
        &self.combat
    }

    pub fn combat_state_mut(&mut self) -> &mut CombatState {
        &mut self.combat
    }

    pub fn hit_state(&self) -> Option<&HitState> {
        self.hit.as_ref()
    }

    pub fn hit_state_mut(&mut self) -> Option<&mut HitState> {
        self.hit.as_mut()
    }

    /// Attempts to make `id` the active state.
    ///
    /// Returns false when:
    /// - `id` is already active and `force_restart` is not set
    /// - `id` is [`StateId::Hit`] and the machine has no hit state
    /// - `id` is [`StateId::Combat`] and no action has been staged
    ///
    /// Leaving Combat drops its action data. Exit hooks are the caller's job.
    pub fn try_activate_state(&mut self, id: StateId, force_restart: bool, now: Tick) -> bool {
        if id == self.active && !force_restart {
            return false;
        }
        match id {
            StateId::Hit if self.hit.is_none() => return false,
            StateId::Combat if !self.combat.has_next_action() => return false,
            _ => {}
        }

        if self.active == StateId::Combat {
            self.combat.exit();
        }

        match id {
            StateId::Idle => {}
            StateId::Combat => self.combat.enter(),
            StateId::Hit => {
                if let Some(hit) = self.hit.as_mut() {
                    hit.elapsed = 0.0;
                }
            }
        }

        self.active = id;
        self.entered_at = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::action::{ActionData, ActionKind};
    use crate::state::EntityId;

    fn staged_machine() -> StateMachine {
        let mut machine = StateMachine::new().with_hit_state();
        let mut data = ActionData::new(ActionKind::MeleeAttack, EntityId(1), Tick(0));
        data.add_target(EntityId(2)).unwrap();
        machine
            .combat_state_mut()
            .set_next_action(data, Vec3::new(0.1, 0.1, 0.1));
        machine
    }

    #[test]
    fn combat_requires_staged_action() {
        let mut machine = StateMachine::new();
        assert!(!machine.try_activate_state(StateId::Combat, false, Tick(1)));
        assert_eq!(machine.active_state(), StateId::Idle);

        let mut machine = staged_machine();
        assert!(machine.try_activate_state(StateId::Combat, false, Tick(1)));
        assert!(machine.is_active::<CombatState>());
        assert_eq!(machine.entered_at(), Tick(1));
        assert!(machine.combat_state().current_action_data().is_some());
    }

    #[test]
    fn reactivation_needs_force() {
        let mut machine = StateMachine::new().with_hit_state();
        assert!(!machine.try_activate_state(StateId::Idle, false, Tick(0)));
        assert!(machine.try_activate_state(StateId::Hit, false, Tick(1)));
        assert!(!machine.try_activate_state(StateId::Hit, false, Tick(2)));
        assert!(machine.try_activate_state(StateId::Hit, true, Tick(2)));
        assert_eq!(machine.entered_at(), Tick(2));
    }

    #[test]
    fn missing_hit_state_refuses_activation() {
        let mut machine = StateMachine::new();
        assert!(machine.get_state::<HitState>().is_none());
        assert!(!machine.try_activate_state(StateId::Hit, true, Tick(0)));
        assert_eq!(machine.active_state(), StateId::Idle);
    }

    #[test]
    fn leaving_combat_clears_action() {
        let mut machine = staged_machine();
        machine.try_activate_state(StateId::Combat, false, Tick(0));
        assert!(machine.try_activate_state(StateId::Hit, true, Tick(3)));

        let combat = machine.get_state::<CombatState>().unwrap();
        assert!(combat.current_action_data().is_none());
        assert!(!combat.has_next_action());
    }

    #[test]
    fn exactly_one_state_active() {
        let mut machine = staged_machine();
        machine.try_activate_state(StateId::Combat, false, Tick(0));
        let flags = [
            machine.is_active::<IdleState>(),
            machine.is_active::<CombatState>(),
            machine.is_active::<HitState>(),
        ];
        assert_eq!(flags.iter().filter(|f| **f).count(), 1);
    }
}
