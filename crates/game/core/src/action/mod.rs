//! Action domain: validation, preparation and per-state hooks.
//!
//! # Module Structure
//!
//! - `kind`: [`ActionKind`] and the replicated [`ActionData`] payload
//! - `validation`: ordered legality checks returning [`ValidationResponse`]
//! - `range`: planar range gating and target lock
//! - `attack`: [`AttackAction`], the melee implementation of [`GameAction`]
//! - `catalog`: [`ActionCatalog`] registry consumed by the engine

mod attack;
mod catalog;
mod kind;
pub mod range;
pub mod validation;

pub use attack::AttackAction;
pub use catalog::ActionCatalog;
pub use kind::{ActionData, ActionKind};
pub use range::{in_range_for_action, planar_distance, update_target_lock};
pub use validation::{ActionRequirement, ValidationResponse, is_action_valid, validate};

use glam::Vec3;

use crate::engine::ResolutionReport;
use crate::env::CombatEnv;
use crate::error::CombatError;
use crate::state::{ActorState, Arena, EntityId, Name};
use crate::tables::CombatTables;

/// Behaviour of one action kind across its lifecycle.
///
/// Simulation hooks (`prepare`, `resolve_action`, `on_enter_state`,
/// `on_exit_state`, `on_fixed_update`) only run on the participant holding
/// state authority. Render hooks only touch the actor's view.
pub trait GameAction: Send + Sync + core::fmt::Debug {
    fn kind(&self) -> ActionKind;

    fn requirement(&self) -> ActionRequirement;

    /// Whether this action should take the attempt over other candidates.
    fn priority(&self, actor: &ActorState, target: &ActorState) -> bool;

    /// Windup, active and recovery durations in seconds.
    fn timings(&self, actor: &ActorState) -> Vec3;

    /// Effect handed to the target's hit state when the action lands.
    fn hit_effect(&self) -> Option<Name> {
        None
    }

    fn is_action_valid(
        &self,
        arena: &Arena,
        actor: EntityId,
        target: EntityId,
    ) -> Result<(), ValidationResponse>;

    /// Builds the action payload. Must only run after validation succeeded.
    fn prepare(
        &self,
        arena: &mut Arena,
        actor: EntityId,
        target: EntityId,
    ) -> Result<ActionData, CombatError>;

    /// Stages `data` on the initiator's combat state and activates it.
    fn resolve_action(&self, arena: &mut Arena, data: ActionData) -> Result<bool, CombatError>;

    fn on_enter_state(&self, _actor: &mut ActorState, _tables: &CombatTables) {}

    fn on_exit_state(&self, _actor: &mut ActorState, _tables: &CombatTables) {}

    fn on_enter_state_render(&self, _actor: &mut ActorState) {}

    fn on_render(&self, _actor: &mut ActorState, _target_position: Option<Vec3>) {}

    /// Advances the action by one fixed tick. Returns a report on the tick
    /// the action resolves.
    fn on_fixed_update(
        &self,
        arena: &mut Arena,
        actor: EntityId,
        env: &CombatEnv<'_>,
    ) -> Result<Option<ResolutionReport>, CombatError>;
}
