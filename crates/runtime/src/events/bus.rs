//! Topic-based event bus implementation.

use arena_core::{CombatEvent, EventSink};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::TickEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Action lifecycle (started, interrupted)
    Action,
    /// Damage applications
    Damage,
    /// Hit reactions
    Reaction,
    /// Per-tick summaries
    Tick,
}

impl Topic {
    pub const COUNT: usize = 4;
    pub const ALL: [Topic; Self::COUNT] =
        [Topic::Action, Topic::Damage, Topic::Reaction, Topic::Tick];

    const fn index(self) -> usize {
        match self {
            Topic::Action => 0,
            Topic::Damage => 1,
            Topic::Reaction => 2,
            Topic::Tick => 3,
        }
    }
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Combat(CombatEvent),
    Tick(TickEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(CombatEvent::ActionStarted { .. })
            | Event::Combat(CombatEvent::ActionInterrupted { .. }) => Topic::Action,
            Event::Combat(CombatEvent::DamageApplied { .. }) => Topic::Damage,
            Event::Combat(CombatEvent::HitReaction { .. }) => Topic::Reaction,
            Event::Tick(_) => Topic::Tick,
        }
    }

    /// Wire name of the event (`"AddDamage"`, `"Tick"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Event::Combat(event) => event.name(),
            Event::Tick(_) => "Tick",
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks the simulation.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; Topic::COUNT]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL.map(|_| broadcast::channel(capacity.max(1)).0);
        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels[topic.index()].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[topic.index()].subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("topics", &Topic::COUNT)
            .finish()
    }
}

impl EventSink for EventBus {
    fn trigger(&self, event: CombatEvent) {
        self.publish(Event::Combat(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{EntityId, Tick};

    fn started() -> CombatEvent {
        CombatEvent::ActionStarted {
            attacker: EntityId(1),
            target: EntityId(2),
            tick: Tick(3),
        }
    }

    #[test]
    fn events_only_reach_their_topic() {
        let bus = EventBus::new();
        let mut action_rx = bus.subscribe(Topic::Action);
        let mut damage_rx = bus.subscribe(Topic::Damage);

        bus.trigger(started());

        assert_eq!(action_rx.try_recv().unwrap(), Event::Combat(started()));
        assert!(damage_rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::with_capacity(1);
        bus.trigger(started());
        bus.trigger(started());
    }

    #[test]
    fn subscribe_multiple_returns_one_receiver_per_topic() {
        let bus = EventBus::new();
        let receivers = bus.subscribe_multiple(&[Topic::Damage, Topic::Tick]);
        assert_eq!(receivers.len(), 2);
        assert!(receivers.contains_key(&Topic::Tick));
    }

    #[test]
    fn events_serialize_to_json() {
        let json = serde_json::to_string(&Event::Combat(started())).unwrap();
        assert!(json.contains("ActionStarted"));
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name(), "ActionStarted");
    }
}
