use crate::state::EntityId;

/// Answers whether this participant may mutate an actor's simulation state
/// on the current tick.
pub trait AuthorityOracle: Send + Sync {
    fn has_state_authority(&self, actor: EntityId) -> bool;
}

/// Authority over every actor (dedicated host, offline play, tests).
#[derive(Clone, Copy, Debug, Default)]
pub struct HostAuthority;

impl AuthorityOracle for HostAuthority {
    fn has_state_authority(&self, _actor: EntityId) -> bool {
        true
    }
}

/// Authority over nothing: a proxy that only renders replicated state.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProxyAuthority;

impl AuthorityOracle for ProxyAuthority {
    fn has_state_authority(&self, _actor: EntityId) -> bool {
        false
    }
}

impl<F> AuthorityOracle for F
where
    F: Fn(EntityId) -> bool + Send + Sync,
{
    fn has_state_authority(&self, actor: EntityId) -> bool {
        self(actor)
    }
}
