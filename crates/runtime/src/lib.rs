//! Runtime orchestration for the authoritative combat simulation.
//!
//! This crate wires the pure combat core to tokio: a simulation worker owns
//! the [`arena_core::Arena`] and drives fixed ticks, clients talk to it through
//! [`RuntimeHandle`], and combat events fan out over a topic-based bus.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`authority`] decides which actors this participant simulates
//! - [`telemetry`] installs the tracing subscriber
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod authority;
pub mod events;
pub mod runtime;
pub mod telemetry;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use authority::AuthorityMap;
pub use events::{Event, EventBus, TickEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use telemetry::{LogConfig, init_logging};
