//! Background tasks that back the runtime.
//!
//! The effect ticker drives damage and heal over time between rounds for
//! every character currently in combat.

mod ticker;

pub use ticker::{EffectTicker, TickerHandle};
