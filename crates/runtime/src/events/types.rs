//! Event payloads owned by the runtime.

use arena_core::{EntityId, ResolutionReport, Tick, TickReport};
use serde::{Deserialize, Serialize};

/// Summary of one authoritative fixed tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickEvent {
    pub tick: Tick,
    pub resolutions: Vec<ResolutionReport>,
    pub recovered: Vec<EntityId>,
    /// Hex SHA-256 of the arena after the tick, for desync checks on proxies.
    pub digest: String,
}

impl TickEvent {
    pub fn new(report: TickReport, digest: [u8; 32]) -> Self {
        Self {
            tick: report.tick,
            resolutions: report.resolutions,
            recovered: report.recovered,
            digest: hex::encode(digest),
        }
    }
}
