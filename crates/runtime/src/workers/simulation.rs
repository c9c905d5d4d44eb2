//! Simulation worker that owns the authoritative [`arena_core::Arena`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives
//! [`arena_core::CombatEngine`] once per fixed tick, and publishes events to
//! the [`EventBus`].

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, trace};

use arena_core::{
    ActionAttempt, ActionCatalog, ActionKind, ActorState, Arena, CombatEngine, CombatEnv,
    CombatTables, EntityId, RngOracle, TickReport, state_digest,
};

use crate::api::{Result, RuntimeError};
use crate::authority::AuthorityMap;
use crate::events::{Event, EventBus, TickEvent};

/// Commands that can be sent to the simulation worker
#[derive(Debug)]
pub enum Command {
    /// Start an action on behalf of `actor`.
    Perform {
        kind: ActionKind,
        actor: EntityId,
        target: EntityId,
        reply: oneshot::Sender<Result<ActionAttempt>>,
    },
    /// Run fixed ticks immediately.
    Step {
        ticks: u32,
        reply: oneshot::Sender<Result<Vec<TickReport>>>,
    },
    Render {
        reply: oneshot::Sender<()>,
    },
    SetAutoTick {
        enabled: bool,
        reply: oneshot::Sender<()>,
    },
    Spawn {
        actor: ActorState,
        reply: oneshot::Sender<Result<()>>,
    },
    Despawn {
        id: EntityId,
        reply: oneshot::Sender<Option<ActorState>>,
    },
    /// Query the current arena (read-only).
    QueryArena {
        reply: oneshot::Sender<Arena>,
    },
    QueryActor {
        id: EntityId,
        reply: oneshot::Sender<Option<ActorState>>,
    },
    Digest {
        reply: oneshot::Sender<Result<[u8; 32]>>,
    },
    /// Stop the worker even while other handles are alive.
    Shutdown,
}

/// Everything the engine borrows besides the arena.
pub struct SimulationContext {
    pub tables: CombatTables,
    pub catalog: ActionCatalog,
    pub authority: AuthorityMap,
    pub rng: Box<dyn RngOracle>,
    pub game_seed: u64,
}

/// Background task that owns the arena and processes combat commands.
pub struct SimulationWorker {
    arena: Arena,
    ctx: SimulationContext,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    auto_tick: bool,
}

impl SimulationWorker {
    pub fn new(
        arena: Arena,
        ctx: SimulationContext,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        auto_tick: bool,
    ) -> Self {
        info!(
            actors = arena.len(),
            tick_rate = ctx.tables.timing.tick_rate,
            auto_tick,
            "SimulationWorker initialized"
        );

        Self {
            arena,
            ctx,
            command_rx,
            event_bus,
            auto_tick,
        }
    }

    /// Main worker loop. Exits on [`Command::Shutdown`] or once every handle
    /// is dropped.
    pub async fn run(mut self) {
        let period = Duration::from_secs_f32(self.ctx.tables.timing.tick_seconds());
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                _ = interval.tick(), if self.auto_tick => {
                    if let Err(err) = self.tick() {
                        error!(error = %err, tick = %self.arena.clock, "fixed tick failed");
                    }
                }
            }
        }
        debug!("SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Perform {
                kind,
                actor,
                target,
                reply,
            } => {
                let result = self.engine().try_perform(kind, actor, target);
                if reply.send(result.map_err(RuntimeError::from)).is_err() {
                    debug!("Perform reply channel closed (caller dropped)");
                }
            }
            Command::Step { ticks, reply } => {
                let result = (0..ticks).map(|_| self.tick()).collect();
                if reply.send(result).is_err() {
                    debug!("Step reply channel closed (caller dropped)");
                }
            }
            Command::Render { reply } => {
                self.engine().render();
                let _ = reply.send(());
            }
            Command::SetAutoTick { enabled, reply } => {
                self.auto_tick = enabled;
                let _ = reply.send(());
            }
            Command::Spawn { actor, reply } => {
                let result = self.spawn(actor);
                if reply.send(result).is_err() {
                    debug!("Spawn reply channel closed (caller dropped)");
                }
            }
            Command::Despawn { id, reply } => {
                let _ = reply.send(self.arena.despawn(id));
            }
            Command::QueryArena { reply } => {
                if reply.send(self.arena.clone()).is_err() {
                    debug!("QueryArena reply channel closed (caller dropped)");
                }
            }
            Command::QueryActor { id, reply } => {
                let _ = reply.send(self.arena.actor(id).cloned());
            }
            Command::Digest { reply } => {
                let result = state_digest(&self.arena).map_err(RuntimeError::Digest);
                let _ = reply.send(result);
            }
            Command::Shutdown => {}
        }
    }

    fn engine(&mut self) -> CombatEngine<'_> {
        let env = CombatEnv::new(
            &self.ctx.tables,
            &self.ctx.catalog,
            &self.ctx.authority,
            self.ctx.rng.as_ref(),
            &self.event_bus,
            self.ctx.game_seed,
        );
        CombatEngine::new(&mut self.arena, env)
    }

    /// One authoritative fixed tick followed by a [`TickEvent`].
    fn tick(&mut self) -> Result<TickReport> {
        let report = self.engine().fixed_update()?;
        let digest = state_digest(&self.arena).map_err(RuntimeError::Digest)?;
        trace!(tick = %report.tick, resolutions = report.resolutions.len(), "tick complete");

        self.event_bus
            .publish(Event::Tick(TickEvent::new(report.clone(), digest)));
        Ok(report)
    }

    fn spawn(&mut self, actor: ActorState) -> Result<()> {
        let id = actor.id;
        if self.arena.actor(id).is_some() {
            return Err(RuntimeError::DuplicateActor(id));
        }
        self.arena.spawn(actor);
        debug!(actor = %id, "actor spawned");
        Ok(())
    }
}
