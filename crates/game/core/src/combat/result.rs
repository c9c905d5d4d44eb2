//! Complete attack resolution.

use glam::Vec2;
use tracing::debug;

use super::damage::{
    armour_damage, damage_strength, elemental_shift, max_strength, status_adjusted_max_damage,
};
use super::element::{damage_misalignment, elemental_strength};
use super::hit::{HitRoll, RollSeed, hits};
use crate::env::RngOracle;
use crate::state::{ActorState, Tick};
use crate::tables::CombatTables;

/// Computed outcome of one attack, before it is applied to the target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    /// Maximum damage after status modifiers.
    pub max_damage: u32,
    pub roll: HitRoll,
    pub health_damage: f32,
    pub armour_damage: f32,
    pub elemental_shift: Vec2,
}

impl AttackOutcome {
    /// Applies the outcome to the target.
    pub fn apply_to(&self, target: &mut ActorState) {
        target.add_health_and_elemental_damage(
            self.health_damage,
            self.armour_damage,
            self.elemental_shift,
        );
    }
}

/// Resolves an attack from `attacker` on `target`.
///
/// # Order
///
/// 1. `max_damage` from the attacker's strength, then target status modifiers
/// 2. per-point hit rolls (accuracy vs dodge)
/// 3. armour active: every hit degrades armour, scaled by elemental
///    alignment; health untouched
/// 4. armour depleted: every hit goes to health
/// 5. elemental shift from whichever damage was dealt
pub fn resolve_attack(
    attacker: &ActorState,
    target: &ActorState,
    tables: &CombatTables,
    rng: &(impl RngOracle + ?Sized),
    seed: RollSeed,
    current_tick: Tick,
) -> AttackOutcome {
    let base_max = max_strength(attacker.stats.strength, &tables.damage);
    let max_damage = status_adjusted_max_damage(
        base_max,
        &target.status_effects,
        &tables.status_modifiers,
        current_tick,
    );

    let roll = hits(
        max_damage,
        attacker.stats.melee_accuracy,
        target.stats.dodge,
        rng,
        seed,
    );

    let element = attacker.weapon.attack_element;
    let (health_damage, armour_dealt) = if target.armour.is_active() {
        let defend = target.armour.default_alignment;
        let misalignment = damage_misalignment(element, defend, &tables.elements);
        let strength = damage_strength(
            elemental_strength(defend, &tables.elements),
            elemental_strength(element, &tables.elements),
            misalignment,
        );
        let dealt = armour_damage(roll.hits, strength);
        debug!(armour_damage = dealt, misalignment, "armour active");
        (0.0, dealt)
    } else {
        debug!(health_damage = roll.hits, "armour disabled");
        (roll.hits as f32, 0.0)
    };

    let dealt = health_damage + armour_dealt;
    AttackOutcome {
        max_damage,
        roll,
        health_damage,
        armour_damage: armour_dealt,
        elemental_shift: elemental_shift(element, max_damage, dealt, &tables.elements),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::ElementalAlignment;
    use crate::env::{PcgRng, RngOracle};
    use crate::state::{Armour, EntityId, StatLine, Weapon, name};
    use glam::Vec3;

    struct AlwaysHit;

    impl RngOracle for AlwaysHit {
        fn next_u32(&self, _seed: u64) -> u32 {
            0
        }
    }

    fn seed() -> RollSeed {
        RollSeed {
            game_seed: 9,
            nonce: 0,
            attacker: EntityId(1),
        }
    }

    fn attacker(element: ElementalAlignment) -> ActorState {
        ActorState::builder(EntityId(1))
            .stats(StatLine {
                strength: 50,
                melee_accuracy: 1.0,
                dodge: 0.0,
            })
            .weapon(Weapon::new(
                name("blade").unwrap(),
                element,
                1.5,
                Vec3::new(0.3, 0.1, 0.2),
            ))
            .build()
    }

    fn target(armour: Armour) -> ActorState {
        ActorState::builder(EntityId(2))
            .stats(StatLine {
                strength: 10,
                melee_accuracy: 0.5,
                dodge: 0.0,
            })
            .armour(armour)
            .build()
    }

    #[test]
    fn without_armour_all_damage_goes_to_health() {
        let tables = CombatTables::standard();
        let outcome = resolve_attack(
            &attacker(ElementalAlignment::Fire),
            &target(Armour::none()),
            &tables,
            &AlwaysHit,
            seed(),
            Tick(0),
        );

        assert_eq!(outcome.max_damage, 10);
        assert_eq!(outcome.health_damage, 10.0);
        assert_eq!(outcome.armour_damage, 0.0);
        assert_eq!(outcome.elemental_shift, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn armour_absorbs_with_elemental_advantage() {
        let tables = CombatTables::standard();
        let outcome = resolve_attack(
            &attacker(ElementalAlignment::Water),
            &target(Armour::new(50.0, ElementalAlignment::Fire)),
            &tables,
            &AlwaysHit,
            seed(),
            Tick(0),
        );

        assert_eq!(outcome.health_damage, 0.0);
        assert_eq!(outcome.armour_damage, 10.0 * tables.elements.advantage);
    }

    #[test]
    fn zero_armour_never_credits_armour_for_any_roll() {
        let tables = CombatTables::standard();
        let target = target(Armour::new(0.0, ElementalAlignment::Earth));
        for nonce in 0..50 {
            let outcome = resolve_attack(
                &attacker(ElementalAlignment::Air),
                &target,
                &tables,
                &PcgRng,
                RollSeed { nonce, ..seed() },
                Tick(0),
            );
            assert_eq!(outcome.armour_damage, 0.0);
            assert_eq!(outcome.health_damage, outcome.roll.hits as f32);
        }
    }

    #[test]
    fn dreamweave_target_caps_max_damage() {
        let tables = CombatTables::standard();
        let mut dreaming = target(Armour::none());
        dreaming
            .status_effects
            .add(name("dreamweave").unwrap(), Tick(10))
            .unwrap();

        let outcome = resolve_attack(
            &attacker(ElementalAlignment::Fire),
            &dreaming,
            &tables,
            &AlwaysHit,
            seed(),
            Tick(0),
        );
        assert_eq!(outcome.max_damage, 2);
        assert_eq!(outcome.health_damage, 2.0);
    }

    #[test]
    fn applying_outcome_updates_target() {
        let tables = CombatTables::standard();
        let mut defender = target(Armour::none());
        let outcome = resolve_attack(
            &attacker(ElementalAlignment::Fire),
            &defender,
            &tables,
            &AlwaysHit,
            seed(),
            Tick(0),
        );

        outcome.apply_to(&mut defender);
        assert_eq!(defender.health.hit_points, 90.0);
        assert_eq!(defender.elemental_balance, Vec2::new(1.0, 0.0));
    }
}
