//! Game-visible combat notifications.
//!
//! The engine publishes through an injected [`EventSink`]; the runtime's
//! event bus implements it, tests use [`RecordedEvents`].

use std::sync::Mutex;

use crate::combat::AttackOutcome;
use crate::engine::InterruptReason;
use crate::state::{EntityId, Tick};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// An actor entered its combat state with a locked target.
    ActionStarted {
        attacker: EntityId,
        target: EntityId,
        tick: Tick,
    },
    /// Damage landed on a target.
    DamageApplied {
        attacker: EntityId,
        target: EntityId,
        outcome: AttackOutcome,
        tick: Tick,
    },
    /// Re-validation on the finishing tick failed; nothing was applied.
    ActionInterrupted {
        attacker: EntityId,
        target: EntityId,
        reason: InterruptReason,
        tick: Tick,
    },
    /// A target entered its hit state.
    HitReaction { actor: EntityId, tick: Tick },
}

impl CombatEvent {
    /// Event name used by subscribers (damage numbers, audio, telemetry).
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ActionStarted { .. } => "ActionStarted",
            Self::DamageApplied { .. } => "AddDamage",
            Self::ActionInterrupted { .. } => "ActionInterrupted",
            Self::HitReaction { .. } => "HitReaction",
        }
    }

    /// Entity the event is about.
    pub const fn target(&self) -> EntityId {
        match self {
            Self::ActionStarted { target, .. }
            | Self::DamageApplied { target, .. }
            | Self::ActionInterrupted { target, .. } => *target,
            Self::HitReaction { actor, .. } => *actor,
        }
    }

    pub const fn tick(&self) -> Tick {
        match self {
            Self::ActionStarted { tick, .. }
            | Self::DamageApplied { tick, .. }
            | Self::ActionInterrupted { tick, .. }
            | Self::HitReaction { tick, .. } => *tick,
        }
    }
}

/// Publish side of the event system.
pub trait EventSink: Send + Sync {
    fn trigger(&self, event: CombatEvent);
}

/// Discards every event.
impl EventSink for () {
    fn trigger(&self, _event: CombatEvent) {}
}

/// Sink that keeps every event in order.
#[derive(Debug, Default)]
pub struct RecordedEvents {
    events: Mutex<Vec<CombatEvent>>,
}

impl RecordedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the recorded events.
    pub fn take(&self) -> Vec<CombatEvent> {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *events)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.iter().map(CombatEvent::name).collect()
    }
}

impl EventSink for RecordedEvents {
    fn trigger(&self, event: CombatEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_events_keep_order() {
        let sink = RecordedEvents::new();
        sink.trigger(CombatEvent::HitReaction {
            actor: EntityId(2),
            tick: Tick(4),
        });
        sink.trigger(CombatEvent::ActionStarted {
            attacker: EntityId(1),
            target: EntityId(2),
            tick: Tick(5),
        });

        assert_eq!(sink.names(), vec!["HitReaction", "ActionStarted"]);
        let events = sink.take();
        assert_eq!(events[1].target(), EntityId(2));
        assert_eq!(events[1].tick(), Tick(5));
        assert!(sink.take().is_empty());
    }
}
