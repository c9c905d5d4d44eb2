//! Damage calculation.

use glam::Vec2;

use super::element::ElementalAlignment;
use crate::state::{StatusEffects, Tick};
use crate::tables::{DamageParams, ElementParams, StatusModifier};

/// Maximum damage (number of damage points rolled) for a strength stat.
///
/// # Formula
///
/// ```text
/// max_damage = max(base + strength / strength_per_point, minimum)
/// ```
pub fn max_strength(strength: u32, params: &DamageParams) -> u32 {
    let per_point = params.strength_per_point.max(1);
    (params.base + strength / per_point).max(params.minimum)
}

/// Applies every status modifier whose effect is active on the target.
///
/// Each matching modifier floors `max_damage × factor`; modifiers compose in
/// table order.
pub fn status_adjusted_max_damage(
    max_damage: u32,
    target_effects: &StatusEffects,
    modifiers: &[StatusModifier],
    current_tick: Tick,
) -> u32 {
    modifiers
        .iter()
        .filter(|m| target_effects.has(&m.effect, current_tick))
        .fold(max_damage, |max, m| {
            (max as f32 * m.max_damage_factor.max(0.0)).floor() as u32
        })
}

/// Combines defender and attacker elemental strengths with the misalignment
/// multiplier into a single armour damage multiplier.
///
/// ```text
/// strength = (attacker / defender) × misalignment
/// ```
///
/// A defender strength of zero offers no resistance.
pub fn damage_strength(defender_strength: f32, attacker_strength: f32, misalignment: f32) -> f32 {
    let ratio = if defender_strength > f32::EPSILON {
        attacker_strength / defender_strength
    } else {
        attacker_strength
    };
    (ratio * misalignment).max(0.0)
}

/// Damage credited to armour degradation.
pub fn armour_damage(hits: u32, armour_strength: f32) -> f32 {
    hits as f32 * armour_strength.max(0.0)
}

/// Elemental balance delta pushed onto the target.
///
/// Points along the attacking element's direction, scaled by the fraction of
/// the maximum damage that was dealt.
pub fn elemental_shift(
    element: ElementalAlignment,
    max_damage: u32,
    damage_dealt: f32,
    params: &ElementParams,
) -> Vec2 {
    if max_damage == 0 {
        return Vec2::ZERO;
    }
    element.direction() * (damage_dealt / max_damage as f32) * params.shift_scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::name;

    #[test]
    fn strength_curve_is_monotonic() {
        let params = DamageParams::default();
        assert_eq!(max_strength(50, &params), 10);
        assert_eq!(max_strength(0, &params), params.minimum);

        let mut previous = 0;
        for strength in 0..200 {
            let value = max_strength(strength, &params);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn dreamweave_quarters_max_damage() {
        let mut effects = StatusEffects::empty();
        effects.add(name("dreamweave").unwrap(), Tick(100)).unwrap();
        let modifiers = [StatusModifier::new(StatusModifier::DREAMWEAVE, 0.25)];

        for base in [0_u32, 1, 3, 10, 37] {
            let adjusted = status_adjusted_max_damage(base, &effects, &modifiers, Tick(0));
            assert_eq!(adjusted, (base as f32 * 0.25).floor() as u32);
        }

        // Expired effect no longer applies.
        assert_eq!(status_adjusted_max_damage(10, &effects, &modifiers, Tick(100)), 10);
    }

    #[test]
    fn unrelated_effects_do_not_modify() {
        let mut effects = StatusEffects::empty();
        effects.add(name("burning").unwrap(), Tick(100)).unwrap();
        let modifiers = [StatusModifier::new(StatusModifier::DREAMWEAVE, 0.25)];
        assert_eq!(status_adjusted_max_damage(12, &effects, &modifiers, Tick(0)), 12);
    }

    #[test]
    fn damage_strength_combines_ratio_and_misalignment() {
        assert_eq!(damage_strength(1.0, 1.0, 1.5), 1.5);
        assert_eq!(damage_strength(2.0, 1.0, 1.0), 0.5);
        assert_eq!(damage_strength(0.0, 1.0, 0.5), 0.5);
        assert_eq!(damage_strength(1.0, 1.0, -1.0), 0.0);
    }

    #[test]
    fn armour_damage_scales_hits() {
        assert_eq!(armour_damage(4, 1.5), 6.0);
        assert_eq!(armour_damage(0, 1.5), 0.0);
    }

    #[test]
    fn shift_is_proportional_to_damage_dealt() {
        let params = ElementParams::default();
        let full = elemental_shift(ElementalAlignment::Fire, 10, 10.0, &params);
        let half = elemental_shift(ElementalAlignment::Fire, 10, 5.0, &params);

        assert_eq!(full, Vec2::new(1.0, 0.0));
        assert_eq!(half, Vec2::new(0.5, 0.0));
        assert_eq!(elemental_shift(ElementalAlignment::Fire, 0, 5.0, &params), Vec2::ZERO);
        assert_eq!(elemental_shift(ElementalAlignment::Neutral, 10, 10.0, &params), Vec2::ZERO);
    }
}
