//! Topic-based event bus for runtime events.
//!
//! Combat events raised by the core are routed to a topic per concern, so a
//! damage-number overlay can subscribe to [`Topic::Damage`] without seeing
//! every tick summary.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::TickEvent;
