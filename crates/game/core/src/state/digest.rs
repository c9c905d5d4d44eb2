//! Deterministic digest of the arena for desync detection.
//!
//! The authority publishes the digest after each tick; proxies compare it
//! with the digest of their replicated copy.

use sha2::{Digest, Sha256};

use super::arena::Arena;

/// SHA-256 over the bincode encoding of the arena.
pub fn state_digest(arena: &Arena) -> Result<[u8; 32], bincode::Error> {
    let bytes = bincode::serialize(arena)?;
    Ok(Sha256::digest(&bytes).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorState, EntityId};

    #[test]
    fn digest_tracks_state_changes() {
        let mut arena = Arena::new();
        arena.spawn(ActorState::builder(EntityId(1)).build());

        let before = state_digest(&arena).unwrap();
        assert_eq!(before, state_digest(&arena.clone()).unwrap());
        assert_eq!(hex::encode(before).len(), 64);

        arena.actor_mut(EntityId(1)).unwrap().health.hit_points -= 1.0;
        assert_ne!(before, state_digest(&arena).unwrap());
    }
}
