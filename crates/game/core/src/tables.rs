//! Balance tables consumed by the damage model and the combat engine.
//!
//! Every table has an in-code default so the core works without any content
//! files; `arena-content` overrides them from TOML.

/// Complete set of tunable combat parameters.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatTables {
    pub damage: DamageParams,
    pub elements: ElementParams,
    pub energy: EnergyParams,
    pub timing: TimingParams,
    /// Status effects that scale the attacker's maximum damage when present on the target.
    pub status_modifiers: Vec<StatusModifier>,
}

impl CombatTables {
    /// Tables with the stock status modifiers (`dreamweave`) installed.
    pub fn standard() -> Self {
        Self {
            status_modifiers: vec![StatusModifier::new(StatusModifier::DREAMWEAVE, 0.25)],
            ..Self::default()
        }
    }
}

/// Strength curve parameters.
///
/// ```text
/// max_damage = max(base + strength / strength_per_point, minimum)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageParams {
    pub base: u32,
    pub strength_per_point: u32,
    pub minimum: u32,
}

impl Default for DamageParams {
    fn default() -> Self {
        Self {
            base: 0,
            strength_per_point: 5,
            minimum: 1,
        }
    }
}

/// Elemental strengths and misalignment multipliers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementParams {
    pub neutral_strength: f32,
    pub fire_strength: f32,
    pub water_strength: f32,
    pub earth_strength: f32,
    pub air_strength: f32,
    /// Attacking element beats the defending one.
    pub advantage: f32,
    /// Defending element beats the attacking one.
    pub disadvantage: f32,
    pub same_element: f32,
    /// Unrelated elements or either side neutral.
    pub neutral: f32,
    /// Length of the elemental shift produced by a full-damage hit.
    pub shift_scale: f32,
}

impl Default for ElementParams {
    fn default() -> Self {
        Self {
            neutral_strength: 0.5,
            fire_strength: 1.0,
            water_strength: 1.0,
            earth_strength: 1.0,
            air_strength: 1.0,
            advantage: 1.5,
            disadvantage: 0.5,
            same_element: 0.75,
            neutral: 1.0,
            shift_scale: 1.0,
        }
    }
}

/// Energy policy for attacks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnergyParams {
    /// Recharge rate applied while the actor is in its combat state.
    pub attacking_recharge_rate: f32,
    /// Energy spent when the attack resolves (landed or not).
    pub attack_cost: f32,
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            attacking_recharge_rate: 0.2,
            attack_cost: 0.5,
        }
    }
}

/// Fixed-tick timing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingParams {
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Seconds an actor stays in its hit state.
    pub hit_duration: f32,
    /// Minimum reach used when re-checking range on the resolving tick.
    pub resolve_range: f32,
}

impl TimingParams {
    /// Seconds covered by a single fixed tick.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            hit_duration: 0.4,
            resolve_range: 1.75,
        }
    }
}

/// Scales the attacker's maximum damage when the target carries `effect`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusModifier {
    pub effect: String,
    pub max_damage_factor: f32,
}

impl StatusModifier {
    pub const DREAMWEAVE: &'static str = "dreamweave";

    pub fn new(effect: impl Into<String>, max_damage_factor: f32) -> Self {
        Self {
            effect: effect.into(),
            max_damage_factor,
        }
    }
}
