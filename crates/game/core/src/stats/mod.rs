//! Stat system.
//!
//! ```text
//! [ Base attributes (stored on Character) ]
//!      ↓  + equipment bonuses
//!      ↓  + buff/debuff totals
//! [ Effective attributes (StatResolver) ]
//!      ↓
//! [ Resource maximums (ProgressionCalculator) ]
//! ```
//!
//! ## Principles
//!
//! 1. **SSOT**: Base attributes, level and current resources only are stored
//! 2. **Unidirectional Flow**: Maximums derive from effective attributes, never the reverse
//! 3. **Deterministic**: Pure functions, no I/O or randomness

pub mod core;
pub mod progression;
pub mod resolver;

pub use self::core::{Stat, StatBlock};
pub use progression::ProgressionCalculator;
pub use resolver::StatResolver;
