//! Topic-based event bus for runtime events.
//!
//! Round results and session lifecycle go to [`Topic::Combat`]; effect ticks
//! and the refreshed effect list go to [`Topic::Effects`].

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, EffectsEvent};
