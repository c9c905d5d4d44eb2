//! Fixed-tick combat driver.
//!
//! The [`CombatEngine`] is the only path that mutates an [`Arena`] during
//! simulation. Every mutation is gated on state authority; participants
//! without authority call [`CombatEngine::render`] only.
//!
//! Within one [`CombatEngine::fixed_update`], validation, damage
//! computation, application and event emission for an action happen
//! back to back, so no other actor observes a partially resolved attack.

mod report;

pub use report::{
    ActionAttempt, InterruptReason, ResolutionOutcome, ResolutionReport, TickReport,
};

use tracing::{debug, warn};

use crate::action::{ActionKind, GameAction};
use crate::env::{CombatEnv, CombatEvent};
use crate::error::{CombatError, GameError};
use crate::machine::StateId;
use crate::state::{AnimTrigger, Arena, EntityId, Name, Tick};

pub struct CombatEngine<'a> {
    arena: &'a mut Arena,
    env: CombatEnv<'a>,
}

impl<'a> CombatEngine<'a> {
    pub fn new(arena: &'a mut Arena, env: CombatEnv<'a>) -> Self {
        Self { arena, env }
    }

    pub fn arena(&self) -> &Arena {
        self.arena
    }

    fn action(&self, kind: ActionKind) -> Result<&'a dyn GameAction, CombatError> {
        self.env
            .actions
            .get(kind)
            .ok_or(CombatError::UnknownAction(kind))
    }

    /// Attempts to start `kind` from `actor` on `target`.
    ///
    /// authority → validation → priority → prepare → resolve → enter hook.
    /// Refusals come back as [`ActionAttempt`] values; only contract
    /// violations are errors.
    pub fn try_perform(
        &mut self,
        kind: ActionKind,
        actor: EntityId,
        target: EntityId,
    ) -> Result<ActionAttempt, CombatError> {
        if !self.env.has_state_authority(actor) {
            warn!(actor = %actor, "try_perform without state authority");
            return Err(CombatError::AuthorityViolation { actor });
        }
        // Resolution writes to the target, so it must be ours as well.
        if self.arena.actor(target).is_some() && !self.env.has_state_authority(target) {
            warn!(
                actor = %actor,
                target = %target,
                "try_perform on target without state authority"
            );
            return Err(CombatError::AuthorityViolation { actor: target });
        }
        let action = self.action(kind)?;
        let attacker = self
            .arena
            .actor(actor)
            .ok_or(CombatError::ActorNotFound(actor))?;

        if let Err(response) = action.is_action_valid(self.arena, actor, target) {
            debug!(actor = %actor, target = %target, ?response, "action rejected");
            return Ok(ActionAttempt::Rejected(response));
        }
        let defender = self
            .arena
            .actor(target)
            .ok_or(CombatError::ActorNotFound(target))?;
        if !action.priority(attacker, defender) {
            return Ok(ActionAttempt::Deprioritized);
        }

        let data = action.prepare(self.arena, actor, target)?;
        if !action.resolve_action(self.arena, data.clone())? {
            return Ok(ActionAttempt::Busy);
        }

        let attacker = self
            .arena
            .actor_mut(actor)
            .ok_or(CombatError::ActorNotFound(actor))?;
        action.on_enter_state(attacker, self.env.tables);

        debug!(actor = %actor, target = %target, kind = kind.as_snake_case(), "action started");
        self.env.events.trigger(CombatEvent::ActionStarted {
            attacker: actor,
            target,
            tick: self.arena.clock,
        });
        Ok(ActionAttempt::Started(data))
    }

    /// Runs one authoritative fixed tick and advances the clock.
    ///
    /// For every actor this participant has authority over: passive energy
    /// regeneration, expiry of status effects, combat progress and
    /// resolution, hit-state expiry. States entered during the current tick
    /// start advancing on the next one.
    ///
    /// A failing actor does not abandon the tick. The remaining actors are
    /// still stepped and the clock still advances; the first error is
    /// returned afterwards.
    pub fn fixed_update(&mut self) -> Result<TickReport, CombatError> {
        let now = self.arena.clock;
        let mut report = TickReport {
            tick: now,
            ..TickReport::default()
        };
        let mut failure = None;

        for id in self.arena.ids() {
            if !self.env.has_state_authority(id) {
                continue;
            }
            if let Err(err) = self.step_actor(id, now, &mut report) {
                warn!(
                    actor = %id,
                    severity = err.severity().as_str(),
                    code = err.error_code(),
                    "actor step failed"
                );
                failure.get_or_insert(err);
            }
        }

        self.arena.clock = now + 1;
        match failure {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }

    fn step_actor(
        &mut self,
        id: EntityId,
        now: Tick,
        report: &mut TickReport,
    ) -> Result<(), CombatError> {
        let dt = self.env.tables.timing.tick_seconds();
        let hit_duration = self.env.tables.timing.hit_duration;
        let Some(actor) = self.arena.actor_mut(id) else {
            return Ok(());
        };

        actor.energy.recharge(dt);
        actor.status_effects.remove_expired(now);

        if actor.machine.entered_at() == now {
            return Ok(());
        }
        match actor.machine.active_state() {
            StateId::Idle => {}
            StateId::Combat => {
                if let Some(resolution) = self.step_combat(id)? {
                    report.resolutions.push(resolution);
                }
            }
            StateId::Hit => {
                let expired = actor.machine.hit_state_mut().is_none_or(|hit| {
                    hit.elapsed += dt;
                    hit.elapsed >= hit_duration
                });
                if expired && self.transition(id, StateId::Idle, false)? {
                    report.recovered.push(id);
                }
            }
        }
        Ok(())
    }

    fn step_combat(&mut self, id: EntityId) -> Result<Option<ResolutionReport>, CombatError> {
        let kind = self
            .arena
            .actor(id)
            .and_then(|actor| actor.machine.combat_state().current_action_data())
            .map(|data| data.kind)
            .ok_or(CombatError::MissingActionData { actor: id })?;
        let action = self.action(kind)?;

        let resolution = match action.on_fixed_update(self.arena, id, &self.env) {
            Ok(Some(resolution)) => resolution,
            Ok(None) => return Ok(None),
            Err(err) => {
                // The action cannot complete; release the attacker before reporting.
                self.transition(id, StateId::Idle, false)?;
                return Err(err);
            }
        };

        let tick = self.arena.clock;
        match resolution.outcome {
            ResolutionOutcome::Landed(outcome) => {
                self.env.events.trigger(CombatEvent::DamageApplied {
                    attacker: resolution.attacker,
                    target: resolution.target,
                    outcome,
                    tick,
                });
                self.drive_hit(resolution.target, action.hit_effect())?;
            }
            ResolutionOutcome::Interrupted(reason) => {
                debug!(attacker = %id, target = %resolution.target, ?reason, "action interrupted");
                self.env.events.trigger(CombatEvent::ActionInterrupted {
                    attacker: resolution.attacker,
                    target: resolution.target,
                    reason,
                    tick,
                });
            }
        }

        self.transition(id, StateId::Idle, false)?;
        Ok(Some(resolution))
    }

    /// Forces `target` into its hit state. Targets without one are left alone.
    fn drive_hit(&mut self, target: EntityId, effect: Option<Name>) -> Result<(), CombatError> {
        let Some(hit) = self
            .arena
            .actor_mut(target)
            .and_then(|actor| actor.machine.hit_state_mut())
        else {
            return Ok(());
        };
        hit.hit_effect = effect;

        if self.transition(target, StateId::Hit, true)? {
            self.env.events.trigger(CombatEvent::HitReaction {
                actor: target,
                tick: self.arena.clock,
            });
        }
        Ok(())
    }

    /// Activates `to` on `id`, running the exit hook of an action being left.
    fn transition(&mut self, id: EntityId, to: StateId, force: bool) -> Result<bool, CombatError> {
        let now = self.arena.clock;
        let actions = self.env.actions;
        let tables = self.env.tables;
        let actor = self
            .arena
            .actor_mut(id)
            .ok_or(CombatError::ActorNotFound(id))?;

        let exiting = match actor.machine.active_state() {
            StateId::Combat => actor
                .machine
                .combat_state()
                .current_action_data()
                .map(|data| data.kind),
            _ => None,
        };
        if !actor.machine.try_activate_state(to, force, now) {
            return Ok(false);
        }
        if let Some(action) = exiting.and_then(|kind| actions.get(kind)) {
            action.on_exit_state(actor, tables);
        }
        Ok(true)
    }

    /// Presentation pass. Never gated on authority and never touches
    /// simulation fields; may run more often than the fixed tick.
    pub fn render(&mut self) {
        let actions = self.env.actions;
        for id in self.arena.ids() {
            let target_position = self
                .arena
                .actor(id)
                .and_then(|actor| actor.machine.combat_state().current_action_data())
                .and_then(|data| self.arena.get_target(data))
                .map(|target| target.position());
            let Some(actor) = self.arena.actor_mut(id) else {
                continue;
            };

            let key = (actor.machine.active_state(), actor.machine.entered_at());
            let entering = actor.view.presented != Some(key);
            match key.0 {
                StateId::Idle => {}
                StateId::Combat => {
                    let action = actor
                        .machine
                        .combat_state()
                        .current_action_data()
                        .and_then(|data| actions.get(data.kind));
                    if let Some(action) = action {
                        if entering {
                            action.on_enter_state_render(actor);
                        }
                        action.on_render(actor, target_position);
                    }
                }
                StateId::Hit => {
                    if let (true, Some(animator)) = (entering, actor.view.animator.as_mut()) {
                        animator.set_trigger(AnimTrigger::Hit);
                    }
                }
            }
            actor.view.presented = Some(key);
        }
    }
}
