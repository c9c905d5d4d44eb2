//! Melee attack: the one action the combat machine currently schedules.

use glam::Vec3;
use tracing::{debug, trace, warn};

use super::GameAction;
use super::kind::{ActionData, ActionKind};
use super::range::{in_range_for_action, update_target_lock};
use super::validation::{ActionRequirement, ValidationResponse, is_action_valid};
use crate::combat::{RollSeed, resolve_attack};
use crate::engine::{InterruptReason, ResolutionOutcome, ResolutionReport};
use crate::env::CombatEnv;
use crate::error::CombatError;
use crate::machine::StateId;
use crate::state::{ActorState, AnimTrigger, Arena, EntityId, Name};
use crate::tables::CombatTables;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttackAction {
    /// Effect handed to the target's hit state when damage lands.
    pub hit_effect: Option<Name>,
}

impl AttackAction {
    pub fn with_hit_effect(hit_effect: Name) -> Self {
        Self {
            hit_effect: Some(hit_effect),
        }
    }

    /// Finishing-tick checkpoint: the target must still resolve, be alive and
    /// be in reach. Only then is damage rolled and applied.
    fn resolve_hit(
        &self,
        arena: &mut Arena,
        attacker_id: EntityId,
        target_id: EntityId,
        env: &CombatEnv<'_>,
    ) -> Result<ResolutionOutcome, CombatError> {
        let now = arena.clock;
        let attacker = arena
            .actor(attacker_id)
            .ok_or(CombatError::ActorNotFound(attacker_id))?;
        let Some(target) = arena.actor(target_id) else {
            return Ok(ResolutionOutcome::Interrupted(InterruptReason::TargetLost));
        };
        if !target.is_alive() {
            return Ok(ResolutionOutcome::Interrupted(InterruptReason::TargetDead));
        }

        let reach = attacker.attack_range().max(env.tables.timing.resolve_range);
        let (in_range, deficit) = in_range_for_action(reach, attacker, target);
        if !in_range {
            return Ok(ResolutionOutcome::Interrupted(InterruptReason::OutOfRange(
                deficit,
            )));
        }

        if !env.has_state_authority(target_id) {
            warn!(
                attacker = %attacker_id,
                target = %target_id,
                "damage on actor without state authority"
            );
            return Err(CombatError::AuthorityViolation { actor: target_id });
        }

        let seed = RollSeed {
            game_seed: env.game_seed,
            nonce: arena.nonce,
            attacker: attacker_id,
        };
        let outcome = resolve_attack(attacker, target, env.tables, env.rng, seed, now);

        arena.nonce += 1;
        let target = arena
            .actor_mut(target_id)
            .ok_or(CombatError::ActorNotFound(target_id))?;
        outcome.apply_to(target);

        Ok(ResolutionOutcome::Landed(outcome))
    }
}

impl GameAction for AttackAction {
    fn kind(&self) -> ActionKind {
        ActionKind::MeleeAttack
    }

    fn requirement(&self) -> ActionRequirement {
        ActionRequirement::MELEE
    }

    fn priority(&self, actor: &ActorState, target: &ActorState) -> bool {
        in_range_for_action(actor.attack_range(), actor, target).0
    }

    fn timings(&self, actor: &ActorState) -> Vec3 {
        actor.weapon.anim_timings
    }

    fn hit_effect(&self) -> Option<Name> {
        self.hit_effect
    }

    fn is_action_valid(
        &self,
        arena: &Arena,
        actor: EntityId,
        target: EntityId,
    ) -> Result<(), ValidationResponse> {
        is_action_valid(arena, actor, target, self.requirement())
    }

    fn prepare(
        &self,
        arena: &mut Arena,
        actor: EntityId,
        target: EntityId,
    ) -> Result<ActionData, CombatError> {
        let mut data = ActionData::new(self.kind(), actor, arena.clock);
        data.add_target(target)?;

        let actor = arena
            .actor_mut(actor)
            .ok_or(CombatError::ActorNotFound(actor))?;
        update_target_lock(actor, Some(target));

        Ok(data)
    }

    fn resolve_action(&self, arena: &mut Arena, data: ActionData) -> Result<bool, CombatError> {
        let now = arena.clock;
        let attacker = arena
            .get_active(&data)
            .ok_or(CombatError::ActorNotFound(data.initiator()))?;
        let timings = self.timings(attacker);

        let attacker = arena
            .actor_mut(data.initiator())
            .ok_or(CombatError::ActorNotFound(data.initiator()))?;
        attacker
            .machine
            .combat_state_mut()
            .set_next_action(data, timings);
        Ok(attacker
            .machine
            .try_activate_state(StateId::Combat, false, now))
    }

    fn on_enter_state(&self, actor: &mut ActorState, tables: &CombatTables) {
        actor
            .energy
            .set_recharge_rate(tables.energy.attacking_recharge_rate);
    }

    fn on_exit_state(&self, actor: &mut ActorState, _tables: &CombatTables) {
        actor.energy.reset_recharge_rate();
        update_target_lock(actor, None);
    }

    fn on_enter_state_render(&self, actor: &mut ActorState) {
        if let Some(animator) = actor.view.animator.as_mut() {
            animator.set_trigger(AnimTrigger::Attacking);
        }
    }

    fn on_render(&self, actor: &mut ActorState, target_position: Option<Vec3>) {
        let Some(target_position) = target_position else {
            return;
        };
        let position = actor.position();
        let look = Vec3::new(target_position.x, position.y, target_position.z);
        if let Some(facing) = (look - position).try_normalize() {
            actor.view.facing = facing;
        }
    }

    fn on_fixed_update(
        &self,
        arena: &mut Arena,
        actor: EntityId,
        env: &CombatEnv<'_>,
    ) -> Result<Option<ResolutionReport>, CombatError> {
        let dt = env.tables.timing.tick_seconds();
        let attacker = arena
            .actor_mut(actor)
            .ok_or(CombatError::ActorNotFound(actor))?;

        let progress = &mut attacker.machine.combat_state_mut().progress;
        let finished = progress.advance(dt);
        trace!(
            actor = %actor,
            phase = ?progress.phase(),
            elapsed = progress.elapsed,
            "combat progress"
        );
        if !finished {
            return Ok(None);
        }

        let data = attacker
            .machine
            .combat_state()
            .current_action_data()
            .cloned()
            .ok_or(CombatError::MissingActionData { actor })?;
        let target = data
            .target()
            .ok_or(CombatError::MissingTarget { actor })?;

        debug!(attacker = %actor, target = %target, "attack resolve start");
        // Spent whether or not the hit lands.
        attacker.energy.spend(env.tables.energy.attack_cost);

        let outcome = self.resolve_hit(arena, actor, target, env)?;
        debug!(attacker = %actor, target = %target, ?outcome, "attack resolve end");

        Ok(Some(ResolutionReport {
            attacker: actor,
            target,
            outcome,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::name;

    #[test]
    fn look_at_is_flattened_to_actor_height() {
        let action = AttackAction::default();
        let mut actor = ActorState::builder(EntityId(1))
            .position(Vec3::new(0.0, 1.0, 0.0))
            .build();

        action.on_render(&mut actor, Some(Vec3::new(3.0, 5.0, 0.0)));
        assert_eq!(actor.view.facing, Vec3::X);

        // Target directly overhead leaves facing untouched.
        action.on_render(&mut actor, Some(Vec3::new(0.0, 9.0, 0.0)));
        assert_eq!(actor.view.facing, Vec3::X);
    }

    #[test]
    fn hooks_throttle_and_restore_energy() {
        let action = AttackAction::with_hit_effect(name("spark").unwrap());
        let tables = CombatTables::standard();
        let mut actor = ActorState::builder(EntityId(1)).build();
        actor.target_lock = Some(EntityId(2));

        action.on_enter_state(&mut actor, &tables);
        assert_eq!(actor.energy.recharge_rate, 0.2);

        action.on_exit_state(&mut actor, &tables);
        assert_eq!(actor.energy.recharge_rate, actor.energy.base_recharge_rate);
        assert_eq!(actor.target_lock, None);
        assert_eq!(action.hit_effect().unwrap().as_str(), "spark");
    }

    #[test]
    fn enter_render_without_animator_is_noop() {
        let action = AttackAction::default();
        let mut actor = ActorState::builder(EntityId(1)).build();
        action.on_enter_state_render(&mut actor);
        assert!(actor.view.animator.is_none());
    }
}
