//! Hit resolution: accuracy against dodge, one roll per damage point.

use crate::env::{RngOracle, compute_seed};
use crate::state::EntityId;

/// Outcome of rolling every potential damage point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitRoll {
    pub hits: u32,
    pub misses: u32,
}

/// Seed material for one resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollSeed {
    pub game_seed: u64,
    /// Resolution counter of the arena at the time of the roll.
    pub nonce: u64,
    pub attacker: EntityId,
}

/// Probability that a single damage point lands.
///
/// ```text
/// p = clamp(accuracy, 0, 1) × (1 − clamp(dodge, 0, 1))
/// ```
pub fn hit_probability(accuracy: f32, dodge: f32) -> f64 {
    let accuracy = f64::from(accuracy.clamp(0.0, 1.0));
    let dodge = f64::from(dodge.clamp(0.0, 1.0));
    accuracy * (1.0 - dodge)
}

/// Rolls `max_damage` independent Bernoulli trials.
///
/// Point `i` uses `compute_seed(game_seed, nonce, attacker, i)`, so identical
/// inputs and the same oracle always produce the same roll.
pub fn hits(
    max_damage: u32,
    accuracy: f32,
    dodge: f32,
    rng: &(impl RngOracle + ?Sized),
    seed: RollSeed,
) -> HitRoll {
    let p = hit_probability(accuracy, dodge);

    let hits = (0..max_damage)
        .filter(|point| {
            let point_seed = compute_seed(seed.game_seed, seed.nonce, seed.attacker.0, *point);
            rng.roll_unit(point_seed) < p
        })
        .count() as u32;

    HitRoll {
        hits,
        misses: max_damage - hits,
    }
}
