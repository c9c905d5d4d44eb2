//! Actor state: a networked combatant and the attributes combat reads and writes.
//!
//! # Invariants
//!
//! - `health.hit_points` and `armour.value` never drop below zero
//! - at most one combat state per actor (held by [`StateMachine`])
//! - `machine` has a hit state iff `capabilities` contains `HIT_REACTIVE`
//! - `view` is presentation only; simulation code never reads it

use bitflags::bitflags;
use glam::{Vec2, Vec3};

use super::common::{EntityId, Name, Tick};
use super::status::StatusEffects;
use super::view::{ActorView, Animator};
use crate::combat::ElementalAlignment;
use crate::machine::{HitState, StateMachine};

bitflags! {
    /// Capabilities an actor exposes to other systems.
    ///
    /// Queried by value instead of probing for components.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Capabilities: u8 {
        /// Can be targeted by combat actions.
        const COMBATANT = 1 << 0;
        /// Has a hit state that reacts to landed damage.
        const HIT_REACTIVE = 1 << 1;
        /// Drives an animator on the presentation side.
        const ANIMATED = 1 << 2;
    }
}

/// Which weapon set the actor currently holds ready.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponState {
    #[default]
    None,
    Melee,
    Ranged,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    pub hit_points: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            hit_points: max,
            max,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hit_points > 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armour {
    /// Remaining armour; zero disables the armour branch of damage resolution.
    pub value: f32,
    pub default_alignment: ElementalAlignment,
}

impl Armour {
    pub fn new(value: f32, default_alignment: ElementalAlignment) -> Self {
        Self {
            value,
            default_alignment,
        }
    }

    pub fn none() -> Self {
        Self::new(0.0, ElementalAlignment::Neutral)
    }

    pub fn is_active(&self) -> bool {
        self.value > 0.0
    }
}

/// Combat statistics.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatLine {
    pub strength: u32,
    /// Probability in `[0, 1]` that a damage point connects.
    pub melee_accuracy: f32,
    /// Probability in `[0, 1]` that a connecting point is dodged.
    pub dodge: f32,
}

impl Default for StatLine {
    fn default() -> Self {
        Self {
            strength: 10,
            melee_accuracy: 0.75,
            dodge: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Energy {
    pub value: f32,
    pub max: f32,
    /// Energy regained per second.
    pub recharge_rate: f32,
    /// Rate restored when a throttle ends.
    pub base_recharge_rate: f32,
}

impl Energy {
    pub fn new(max: f32, recharge_rate: f32) -> Self {
        Self {
            value: max,
            max,
            recharge_rate,
            base_recharge_rate: recharge_rate,
        }
    }

    pub fn set_recharge_rate(&mut self, rate: f32) {
        self.recharge_rate = rate;
    }

    pub fn reset_recharge_rate(&mut self) {
        self.recharge_rate = self.base_recharge_rate;
    }

    /// Spends energy, clamping at zero.
    pub fn spend(&mut self, amount: f32) {
        self.value = (self.value - amount).max(0.0);
    }

    pub fn recharge(&mut self, seconds: f32) {
        self.value = (self.value + self.recharge_rate * seconds).min(self.max);
    }
}

/// Equipped weapon.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: Name,
    pub attack_element: ElementalAlignment,
    pub range: f32,
    /// Windup, active and recovery durations in seconds.
    pub anim_timings: Vec3,
}

impl Weapon {
    pub fn new(
        name: Name,
        attack_element: ElementalAlignment,
        range: f32,
        anim_timings: Vec3,
    ) -> Self {
        Self {
            name,
            attack_element,
            range,
            anim_timings,
        }
    }

    pub fn unarmed() -> Self {
        Self::new(Name::new(), ElementalAlignment::Neutral, 1.0, Vec3::new(0.2, 0.1, 0.1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTransform {
    pub position: Vec3,
    pub collision_radius: f32,
}

/// Complete actor state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub capabilities: Capabilities,
    pub transform: ActorTransform,

    pub health: Health,
    pub armour: Armour,
    /// Elemental balance on the alignment plane, kept inside the unit disc.
    pub elemental_balance: Vec2,
    pub stats: StatLine,
    pub energy: Energy,

    pub weapon: Weapon,
    pub weapon_state: WeaponState,
    pub combat_mode: bool,
    pub status_effects: StatusEffects,

    /// Single target this actor's current action is bound to.
    pub target_lock: Option<EntityId>,
    pub machine: StateMachine,

    /// Local presentation; never replicated or digested.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub view: ActorView,
}

impl ActorState {
    pub fn builder(id: EntityId) -> ActorBuilder {
        ActorBuilder::new(id)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    #[inline]
    pub fn has_capability(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    /// Generic status effect query.
    pub fn has_effect(&self, name: &str, current_tick: Tick) -> bool {
        self.status_effects.has(name, current_tick)
    }

    pub fn attack_range(&self) -> f32 {
        self.weapon.range
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Applies resolved damage: health and armour clamp at zero and the
    /// elemental balance stays inside the unit disc.
    pub fn add_health_and_elemental_damage(
        &mut self,
        health_damage: f32,
        armour_damage: f32,
        elemental_shift: Vec2,
    ) {
        self.health.hit_points = (self.health.hit_points - health_damage.max(0.0)).max(0.0);
        self.armour.value = (self.armour.value - armour_damage.max(0.0)).max(0.0);
        self.elemental_balance = (self.elemental_balance + elemental_shift).clamp_length_max(1.0);
    }
}

/// Builder for [`ActorState`] with combat-ready defaults.
#[derive(Clone, Debug)]
pub struct ActorBuilder {
    actor: ActorState,
}

impl ActorBuilder {
    pub fn new(id: EntityId) -> Self {
        Self {
            actor: ActorState {
                id,
                capabilities: Capabilities::COMBATANT | Capabilities::HIT_REACTIVE,
                transform: ActorTransform {
                    position: Vec3::ZERO,
                    collision_radius: 0.5,
                },
                health: Health::new(100.0),
                armour: Armour::none(),
                elemental_balance: Vec2::ZERO,
                stats: StatLine::default(),
                energy: Energy::new(10.0, 1.0),
                weapon: Weapon::unarmed(),
                weapon_state: WeaponState::Melee,
                combat_mode: true,
                status_effects: StatusEffects::empty(),
                target_lock: None,
                machine: StateMachine::new().with_hit_state(),
                view: ActorView::default(),
            },
        }
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.actor.transform.position = position;
        self
    }

    pub fn collision_radius(mut self, radius: f32) -> Self {
        self.actor.transform.collision_radius = radius;
        self
    }

    pub fn health(mut self, max: f32) -> Self {
        self.actor.health = Health::new(max);
        self
    }

    pub fn armour(mut self, armour: Armour) -> Self {
        self.actor.armour = armour;
        self
    }

    pub fn stats(mut self, stats: StatLine) -> Self {
        self.actor.stats = stats;
        self
    }

    pub fn energy(mut self, energy: Energy) -> Self {
        self.actor.energy = energy;
        self
    }

    pub fn weapon(mut self, weapon: Weapon) -> Self {
        self.actor.weapon = weapon;
        self
    }

    pub fn weapon_state(mut self, state: WeaponState) -> Self {
        self.actor.weapon_state = state;
        self
    }

    pub fn combat_mode(mut self, enabled: bool) -> Self {
        self.actor.combat_mode = enabled;
        self
    }

    /// Replaces the capability set, keeping the hit state and animator in sync with it.
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.actor.capabilities = capabilities;
        self.actor.machine.set_hit_state(
            capabilities
                .contains(Capabilities::HIT_REACTIVE)
                .then(HitState::default),
        );
        self.actor.view.animator = capabilities
            .contains(Capabilities::ANIMATED)
            .then(Animator::default);
        self
    }

    pub fn build(self) -> ActorState {
        self.actor
    }
}
