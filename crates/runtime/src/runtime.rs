//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for hosts and proxies to drive combat.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use arena_content::{ActionLoader, ActorLoader, ContentFactory, TablesLoader, WeaponRegistry};
use arena_core::{ActionCatalog, ActorState, Arena, CombatTables, PcgRng, RngOracle};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::authority::AuthorityMap;
use crate::events::EventBus;
use crate::workers::{Command, SimulationContext, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub tables: CombatTables,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Session seed mixed into every hit roll. Random when unset.
    pub game_seed: Option<u64>,
    /// Tick on a timer at `tables.timing.tick_rate` instead of on demand.
    pub auto_tick: bool,
}

impl RuntimeConfig {
    pub fn tick_rate(&self) -> u32 {
        self.tables.timing.tick_rate
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tables: CombatTables::standard(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            game_seed: None,
            auto_tick: false,
        }
    }
}

/// Main runtime that orchestrates combat simulation
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    game_seed: u64,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Seed in effect for this session; proxies need it to reproduce rolls.
    pub fn game_seed(&self) -> u64 {
        self.game_seed
    }

    /// Shutdown the runtime gracefully
    ///
    /// Commands already queued are processed first. Outstanding
    /// [`RuntimeHandle`] clones fail with
    /// [`RuntimeError::CommandChannelClosed`] afterwards.
    pub async fn shutdown(self) -> Result<()> {
        self.handle.request_shutdown().await;
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    arena: Arena,
    catalog: Option<ActionCatalog>,
    authority: AuthorityMap,
    rng: Box<dyn RngOracle>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            arena: Arena::new(),
            catalog: None,
            authority: AuthorityMap::default(),
            rng: Box::new(PcgRng),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tables(mut self, tables: CombatTables) -> Self {
        self.config.tables = tables;
        self
    }

    pub fn tick_rate(mut self, tick_rate: u32) -> Self {
        self.config.tables.timing.tick_rate = tick_rate;
        self
    }

    pub fn game_seed(mut self, seed: u64) -> Self {
        self.config.game_seed = Some(seed);
        self
    }

    pub fn auto_tick(mut self, enabled: bool) -> Self {
        self.config.auto_tick = enabled;
        self
    }

    pub fn authority(mut self, authority: AuthorityMap) -> Self {
        self.authority = authority;
        self
    }

    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn catalog(mut self, catalog: ActionCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Provide initial arena
    pub fn arena(mut self, arena: Arena) -> Self {
        self.arena = arena;
        self
    }

    pub fn actor(mut self, actor: ActorState) -> Self {
        self.arena.spawn(actor);
        self
    }

    /// Loads tables, actions and roster from a content directory.
    pub fn content(self, factory: &ContentFactory) -> Result<Self> {
        let tables = factory.load_tables().map_err(RuntimeError::Content)?;
        let weapons = factory.load_weapons().map_err(RuntimeError::Content)?;
        let catalog = factory.load_actions().map_err(RuntimeError::Content)?;
        let actors = factory
            .load_actors(&weapons)
            .map_err(RuntimeError::Content)?;
        Ok(self.with_content(tables, catalog, actors))
    }

    /// Loads the content compiled into `arena-content`.
    pub fn embedded_content(self) -> Result<Self> {
        let tables = TablesLoader::embedded().map_err(RuntimeError::Content)?;
        let weapons = WeaponRegistry::load().map_err(RuntimeError::Content)?;
        let catalog = ActionLoader::embedded().map_err(RuntimeError::Content)?;
        let actors = ActorLoader::embedded(&weapons).map_err(RuntimeError::Content)?;
        Ok(self.with_content(tables, catalog, actors))
    }

    fn with_content(
        mut self,
        tables: CombatTables,
        catalog: ActionCatalog,
        actors: Vec<ActorState>,
    ) -> Self {
        self.config.tables = tables;
        self.catalog = Some(catalog);
        for actor in actors {
            self.arena.spawn(actor);
        }
        self
    }

    /// Build the runtime and spawn its worker onto the current tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        let game_seed = self.config.game_seed.unwrap_or_else(rand::random);
        info!(
            game_seed,
            tick_rate = self.config.tick_rate(),
            "building combat runtime"
        );

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let ctx = SimulationContext {
            tables: self.config.tables,
            catalog: self.catalog.unwrap_or_else(ActionCatalog::standard),
            authority: self.authority,
            rng: self.rng,
            game_seed,
        };
        let sim_worker = SimulationWorker::new(
            self.arena,
            ctx,
            command_rx,
            event_bus,
            self.config.auto_tick,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            game_seed,
            sim_worker_handle,
        })
    }
}
