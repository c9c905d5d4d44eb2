//! Elemental alignment cycle.
//!
//! ```text
//! Fire ─beats→ Air ─beats→ Earth ─beats→ Water ─beats→ Fire
//! ```
//!
//! Each element also owns a direction on the elemental plane; neighbours in
//! the cycle are a quarter turn apart.

use glam::Vec2;

use crate::tables::ElementParams;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementalAlignment {
    #[default]
    Neutral,
    Fire,
    Water,
    Earth,
    Air,
}

impl ElementalAlignment {
    /// Position in the beats-cycle, `None` for neutral.
    const fn cycle_index(self) -> Option<u8> {
        match self {
            Self::Neutral => None,
            Self::Fire => Some(0),
            Self::Air => Some(1),
            Self::Earth => Some(2),
            Self::Water => Some(3),
        }
    }

    /// True if `self` is strong against `other`.
    pub fn beats(self, other: Self) -> bool {
        match (self.cycle_index(), other.cycle_index()) {
            (Some(a), Some(b)) => (a + 1) % 4 == b,
            _ => false,
        }
    }

    /// Unit direction on the elemental plane (zero for neutral).
    pub fn direction(self) -> Vec2 {
        match self {
            Self::Neutral => Vec2::ZERO,
            Self::Fire => Vec2::X,
            Self::Air => Vec2::Y,
            Self::Earth => Vec2::NEG_X,
            Self::Water => Vec2::NEG_Y,
        }
    }
}

/// Base potency of an element.
pub fn elemental_strength(element: ElementalAlignment, params: &ElementParams) -> f32 {
    match element {
        ElementalAlignment::Neutral => params.neutral_strength,
        ElementalAlignment::Fire => params.fire_strength,
        ElementalAlignment::Water => params.water_strength,
        ElementalAlignment::Earth => params.earth_strength,
        ElementalAlignment::Air => params.air_strength,
    }
}

/// Multiplier for `attack` landing on `defend`.
///
/// Asymmetric: `damage_misalignment(a, b)` is the advantage multiplier when
/// `a` beats `b`, and `damage_misalignment(b, a)` is then the disadvantage one.
pub fn damage_misalignment(
    attack: ElementalAlignment,
    defend: ElementalAlignment,
    params: &ElementParams,
) -> f32 {
    if attack == ElementalAlignment::Neutral || defend == ElementalAlignment::Neutral {
        params.neutral
    } else if attack == defend {
        params.same_element
    } else if attack.beats(defend) {
        params.advantage
    } else if defend.beats(attack) {
        params.disadvantage
    } else {
        params.neutral
    }
}
