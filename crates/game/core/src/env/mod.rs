//! Collaborators the combat core consumes but does not own.
//!
//! Authority, randomness, event publication and the action catalog are all
//! injected. The [`CombatEnv`] aggregate bundles them so the engine can reach
//! everything it needs without coupling to concrete implementations.
mod authority;
mod events;
mod rng;

pub use authority::{AuthorityOracle, HostAuthority, ProxyAuthority};
pub use events::{CombatEvent, EventSink, RecordedEvents};
pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::action::ActionCatalog;
use crate::tables::CombatTables;

/// Read-only collaborators required by the combat engine.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    pub tables: &'a CombatTables,
    pub actions: &'a ActionCatalog,
    pub authority: &'a dyn AuthorityOracle,
    pub rng: &'a dyn RngOracle,
    pub events: &'a dyn EventSink,
    /// Session seed mixed into every roll.
    pub game_seed: u64,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        tables: &'a CombatTables,
        actions: &'a ActionCatalog,
        authority: &'a dyn AuthorityOracle,
        rng: &'a dyn RngOracle,
        events: &'a dyn EventSink,
        game_seed: u64,
    ) -> Self {
        Self {
            tables,
            actions,
            authority,
            rng,
            events,
            game_seed,
        }
    }

    #[inline]
    pub fn has_state_authority(&self, actor: crate::state::EntityId) -> bool {
        self.authority.has_state_authority(actor)
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("tables", self.tables)
            .field("actions", self.actions)
            .field("game_seed", &self.game_seed)
            .finish_non_exhaustive()
    }
}
