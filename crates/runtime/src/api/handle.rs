//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! starting actions, stepping the simulation or streaming events from
//! specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use arena_core::{ActionAttempt, ActionKind, ActorState, Arena, EntityId, TickReport};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone, Debug)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Asks the worker to stop. A worker that is already gone needs nothing.
    pub(crate) async fn request_shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown).await;
    }

    /// Attempts to start `kind` from `actor` against `target`.
    ///
    /// Validation refusals come back as [`ActionAttempt`] values.
    pub async fn perform(
        &self,
        kind: ActionKind,
        actor: EntityId,
        target: EntityId,
    ) -> Result<ActionAttempt> {
        self.request(|reply| Command::Perform {
            kind,
            actor,
            target,
            reply,
        })
        .await?
    }

    /// Runs `ticks` fixed ticks immediately, independent of the tick timer.
    pub async fn step(&self, ticks: u32) -> Result<Vec<TickReport>> {
        self.request(|reply| Command::Step { ticks, reply }).await?
    }

    /// Runs one presentation pass.
    pub async fn render(&self) -> Result<()> {
        self.request(|reply| Command::Render { reply }).await
    }

    /// Starts or stops ticking at the configured tick rate.
    pub async fn set_auto_tick(&self, enabled: bool) -> Result<()> {
        self.request(|reply| Command::SetAutoTick { enabled, reply }).await
    }

    pub async fn spawn(&self, actor: ActorState) -> Result<()> {
        self.request(|reply| Command::Spawn { actor, reply }).await?
    }

    pub async fn despawn(&self, id: EntityId) -> Result<Option<ActorState>> {
        self.request(|reply| Command::Despawn { id, reply }).await
    }

    /// Query the current arena (read-only snapshot)
    pub async fn query_arena(&self) -> Result<Arena> {
        self.request(|reply| Command::QueryArena { reply }).await
    }

    pub async fn query_actor(&self, id: EntityId) -> Result<Option<ActorState>> {
        self.request(|reply| Command::QueryActor { id, reply }).await
    }

    /// SHA-256 digest of the current arena.
    pub async fn digest(&self) -> Result<[u8; 32]> {
        self.request(|reply| Command::Digest { reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Action` - action started and interrupted
    /// - `Topic::Damage` - damage applications (`AddDamage`)
    /// - `Topic::Reaction` - hit reactions
    /// - `Topic::Tick` - per-tick summaries with the arena digest
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
