//! Status effect system.
//!
//! - [`definition`]: static templates attached to abilities
//! - [`engine`]: value computation, instantiation, instant resolution
//! - [`active`]: live effects, ticking, refresh-on-recast, stat totals

pub mod active;
pub mod definition;
pub mod engine;

pub use active::{
    ActiveEffect, ActiveEffectKind, ActiveEffectType, EffectSet, EffectView, PeriodicState,
    StackOutcome,
};
pub use definition::{AbilityEffectDef, EffectType};
pub use engine::{EffectEngine, InstantOutcome};
