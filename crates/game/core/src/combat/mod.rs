//! Combat resolution system.
//!
//! This module provides pure functions for resolving combat interactions.
//! All combat logic is deterministic and side-effect free; randomness comes
//! from an injected [`crate::env::RngOracle`] and explicit seeds.
//!
//! # Core Functions
//!
//! - `max_strength` / `status_adjusted_max_damage`: damage ceiling from strength and effects
//! - `hits`: per-point accuracy vs dodge rolls
//! - `elemental_strength` / `damage_misalignment`: elemental cycle lookups
//! - `damage_strength` / `armour_damage`: armour degradation
//! - `elemental_shift`: elemental balance delta
//! - `resolve_attack`: complete resolution in the order above

pub mod damage;
pub mod element;
pub mod hit;
pub mod result;

pub use damage::{
    armour_damage, damage_strength, elemental_shift, max_strength, status_adjusted_max_damage,
};
pub use element::{ElementalAlignment, damage_misalignment, elemental_strength};
pub use hit::{HitRoll, RollSeed, hit_probability, hits};
pub use result::{AttackOutcome, resolve_attack};
