//! Deterministic combat core shared by the authoritative simulation and its proxies.
//!
//! `arena-core` defines the canonical combat rules (damage model, action
//! validation, per-actor state machine, target lock) and exposes pure APIs that
//! the runtime drives once per fixed tick. All simulation mutation flows through
//! [`engine::CombatEngine`], which only touches actors the caller holds state
//! authority over.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod machine;
pub mod state;
pub mod tables;

pub use glam;

pub use action::{
    ActionCatalog, ActionData, ActionKind, ActionRequirement, AttackAction, GameAction,
    ValidationResponse, in_range_for_action, is_action_valid, update_target_lock,
};
pub use combat::{AttackOutcome, ElementalAlignment, HitRoll, RollSeed};
pub use config::CombatConfig;
pub use engine::{
    ActionAttempt, CombatEngine, InterruptReason, ResolutionOutcome, ResolutionReport, TickReport,
};
pub use env::{
    AuthorityOracle, CombatEnv, CombatEvent, EventSink, HostAuthority, PcgRng, ProxyAuthority,
    RecordedEvents, RngOracle, compute_seed,
};
pub use error::{CapacityError, CombatError, ErrorSeverity, GameError};
pub use machine::{
    CombatState, HitState, IdleState, MachineState, Phase, ProgressState, StateId, StateMachine,
};
#[cfg(feature = "serde")]
pub use state::state_digest;
pub use state::{
    ActorBuilder, ActorState, AnimTrigger, Animator, Arena, Armour, Capabilities, Energy,
    EntityId, Health, Name, StatLine, StatusEffects, Tick, TrackedResource, TrackedResources,
    Weapon, WeaponState, name,
};
pub use tables::CombatTables;
