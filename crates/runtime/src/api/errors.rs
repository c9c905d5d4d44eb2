//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, content loading and the combat
//! core so clients can bubble them up with consistent context.
use arena_core::CombatError;
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("failed to load combat content: {0:#}")]
    Content(anyhow::Error),

    #[error("failed to encode arena for digest")]
    Digest(#[source] bincode::Error),

    #[error("actor {0} already exists in the arena")]
    DuplicateActor(arena_core::EntityId),
}
