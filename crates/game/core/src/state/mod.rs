//! Simulation state owned by the authority and replicated to proxies.
//!
//! The [`Arena`] is the root: it owns every [`ActorState`], the simulation
//! clock, and the tracked-resource ledger. Only the combat engine mutates it
//! during a fixed tick; presentation code only writes to each actor's view.
mod actor;
mod arena;
mod common;
#[cfg(feature = "serde")]
mod digest;
mod resources;
mod status;
mod view;

pub use actor::{
    ActorBuilder, ActorState, ActorTransform, Armour, Capabilities, Energy, Health, StatLine,
    Weapon, WeaponState,
};
pub use arena::Arena;
pub use common::{EntityId, Name, Tick, name};
#[cfg(feature = "serde")]
pub use digest::state_digest;
pub use resources::{
    ResourceDetail, ResourceError, ResourceYield, TrackedResource, TrackedResources,
};
pub use status::{StatusEffect, StatusEffects};
pub use view::{ActorView, AnimTrigger, Animator};
