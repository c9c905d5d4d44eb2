//! State authority assignment for this participant.

use std::collections::BTreeSet;

use arena_core::{AuthorityOracle, EntityId};

/// Which actors this participant simulates.
///
/// A dedicated host owns everything; a proxy owns nothing and only renders;
/// a peer in a shared session owns its own actors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthorityMap {
    #[default]
    All,
    None,
    Owned(BTreeSet<EntityId>),
}

impl AuthorityMap {
    pub fn owning(ids: impl IntoIterator<Item = EntityId>) -> Self {
        Self::Owned(ids.into_iter().collect())
    }

    /// Takes authority over `id`. No-op when everything is already owned.
    pub fn grant(&mut self, id: EntityId) {
        match self {
            Self::All => {}
            Self::None => *self = Self::owning([id]),
            Self::Owned(ids) => {
                ids.insert(id);
            }
        }
    }

    /// Hands `id` to another participant.
    pub fn revoke(&mut self, id: EntityId) {
        if let Self::Owned(ids) = self {
            ids.remove(&id);
        }
    }

    pub fn owns(&self, id: EntityId) -> bool {
        match self {
            Self::All => true,
            Self::None => false,
            Self::Owned(ids) => ids.contains(&id),
        }
    }
}

impl AuthorityOracle for AuthorityMap {
    fn has_state_authority(&self, id: EntityId) -> bool {
        self.owns(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_and_revoke() {
        let mut map = AuthorityMap::None;
        assert!(!map.has_state_authority(EntityId(1)));

        map.grant(EntityId(1));
        assert!(map.has_state_authority(EntityId(1)));
        assert!(!map.has_state_authority(EntityId(2)));

        map.revoke(EntityId(1));
        assert_eq!(map, AuthorityMap::Owned(BTreeSet::new()));
    }

    #[test]
    fn host_owns_everything() {
        let mut map = AuthorityMap::default();
        map.revoke(EntityId(7));
        assert!(map.owns(EntityId(7)));
    }
}
