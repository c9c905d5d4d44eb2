//! Action legality checks.
//!
//! Failures are values, not errors: the caller decides whether to surface
//! them (UI feedback) or drop the attempt silently.

use super::range::in_range_for_action;
use crate::machine::StateId;
use crate::state::{Arena, Capabilities, EntityId, WeaponState};

/// Reason an action attempt was refused.
#[derive(Clone, Copy, Debug, PartialEq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationResponse {
    InvalidTarget,
    InvalidUser,
    WrongAnimState,
    WrongWeaponState,
    /// Distance still to close, in world units.
    OutOfRange(f32),
}

/// What an action needs from its user.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionRequirement {
    pub weapon_state: WeaponState,
    /// Reach override; `None` uses the actor's weapon range.
    pub range: Option<f32>,
}

impl ActionRequirement {
    pub const MELEE: Self = Self {
        weapon_state: WeaponState::Melee,
        range: None,
    };
}

/// Checks, in order, short-circuiting on the first failure:
///
/// 1. actor and target differ
/// 2. target exists and is a combatant
/// 3. target is alive
/// 4. actor's machine is idle
/// 5. actor holds the required weapon set
/// 6. actor is in combat mode
/// 7. target is within range
pub fn is_action_valid(
    arena: &Arena,
    actor: EntityId,
    target: EntityId,
    requirement: ActionRequirement,
) -> Result<(), ValidationResponse> {
    if actor == target {
        return Err(ValidationResponse::InvalidTarget);
    }

    let target = arena
        .actor(target)
        .filter(|t| t.has_capability(Capabilities::COMBATANT))
        .ok_or(ValidationResponse::InvalidUser)?;
    if !target.is_alive() {
        return Err(ValidationResponse::InvalidTarget);
    }

    let actor = arena.actor(actor).ok_or(ValidationResponse::InvalidUser)?;
    if actor.machine.active_state() != StateId::Idle {
        return Err(ValidationResponse::WrongAnimState);
    }
    if actor.weapon_state != requirement.weapon_state {
        return Err(ValidationResponse::WrongWeaponState);
    }
    if !actor.combat_mode {
        return Err(ValidationResponse::InvalidUser);
    }

    let range = requirement.range.unwrap_or_else(|| actor.attack_range());
    let (in_range, deficit) = in_range_for_action(range, actor, target);
    if !in_range {
        return Err(ValidationResponse::OutOfRange(deficit));
    }

    Ok(())
}

/// Flag-and-response form of [`is_action_valid`].
pub fn validate(
    arena: &Arena,
    actor: EntityId,
    target: EntityId,
    requirement: ActionRequirement,
) -> (bool, Option<ValidationResponse>) {
    match is_action_valid(arena, actor, target, requirement) {
        Ok(()) => (true, None),
        Err(response) => (false, Some(response)),
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::combat::ElementalAlignment;
    use crate::state::{ActorState, Tick, Weapon, name};

    fn arena_with_gap(x: f32) -> Arena {
        let mut arena = Arena::new();
        arena.spawn(
            ActorState::builder(EntityId(1))
                .weapon(Weapon::new(
                    name("sword").unwrap(),
                    ElementalAlignment::Fire,
                    1.5,
                    Vec3::new(0.3, 0.1, 0.2),
                ))
                .build(),
        );
        arena.spawn(
            ActorState::builder(EntityId(2))
                .position(Vec3::new(x, 0.0, 0.0))
                .build(),
        );
        arena
    }

    #[test]
    fn self_target_is_invalid() {
        let arena = arena_with_gap(1.0);
        for id in [1, 2] {
            assert_eq!(
                is_action_valid(&arena, EntityId(id), EntityId(id), ActionRequirement::MELEE),
                Err(ValidationResponse::InvalidTarget)
            );
        }
    }

    #[test]
    fn out_of_range_reports_deficit() {
        // radii 0.5 + 0.5, reach 1.5, centre distance 3.0
        let arena = arena_with_gap(3.0);
        assert_eq!(
            is_action_valid(&arena, EntityId(1), EntityId(2), ActionRequirement::MELEE),
            Err(ValidationResponse::OutOfRange(0.5))
        );
    }

    #[test]
    fn valid_attempt_returns_no_response() {
        let arena = arena_with_gap(2.0);
        assert_eq!(
            validate(&arena, EntityId(1), EntityId(2), ActionRequirement::MELEE),
            (true, None)
        );
    }

    #[test]
    fn checks_run_in_order() {
        let mut arena = arena_with_gap(10.0);
        let check = |arena: &Arena| {
            is_action_valid(arena, EntityId(1), EntityId(2), ActionRequirement::MELEE)
        };

        // Dead and far away: the liveness check wins over range.
        arena.actor_mut(EntityId(2)).unwrap().health.hit_points = 0.0;
        assert_eq!(check(&arena), Err(ValidationResponse::InvalidTarget));

        arena.actor_mut(EntityId(2)).unwrap().health.hit_points = 5.0;
        let attacker = arena.actor_mut(EntityId(1)).unwrap();
        attacker.machine.try_activate_state(StateId::Hit, false, Tick(0));
        attacker.weapon_state = WeaponState::Ranged;
        assert_eq!(check(&arena), Err(ValidationResponse::WrongAnimState));

        let attacker = arena.actor_mut(EntityId(1)).unwrap();
        attacker.machine.try_activate_state(StateId::Idle, false, Tick(1));
        assert_eq!(check(&arena), Err(ValidationResponse::WrongWeaponState));

        let attacker = arena.actor_mut(EntityId(1)).unwrap();
        attacker.weapon_state = WeaponState::Melee;
        attacker.combat_mode = false;
        assert_eq!(check(&arena), Err(ValidationResponse::InvalidUser));

        arena.actor_mut(EntityId(1)).unwrap().combat_mode = true;
        assert!(matches!(check(&arena), Err(ValidationResponse::OutOfRange(_))));
    }

    #[test]
    fn non_combatant_target_is_invalid_user() {
        let mut arena = arena_with_gap(1.0);
        arena.actor_mut(EntityId(2)).unwrap().capabilities = Capabilities::ANIMATED;
        assert_eq!(
            is_action_valid(&arena, EntityId(1), EntityId(2), ActionRequirement::MELEE),
            Err(ValidationResponse::InvalidUser)
        );
        assert_eq!(
            is_action_valid(&arena, EntityId(1), EntityId(7), ActionRequirement::MELEE),
            Err(ValidationResponse::InvalidUser)
        );
    }
}
