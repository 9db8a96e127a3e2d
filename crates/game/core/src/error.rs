//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (e.g., `CombatError`, `CharacterError`) are defined in
//! their respective modules alongside the operations they validate. This module
//! provides the shared classification every error exposes to callers.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each operation family has its own error type
//! - **Caller-facing Kinds**: Every error maps to one of four user-facing kinds
//! - **Outcomes Are Not Errors**: Failed triggers, empty loot rolls and skipped
//!   abilities are ordinary results and never surface here

/// Category of an error, used by callers to pick a user-facing message.
///
/// All categories are recoverable at the caller boundary; none of them should
/// terminate the host process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Malformed input (bad stat name, empty character name).
    Validation,

    /// A referenced character, enemy, session or ability does not exist.
    NotFound,

    /// The request conflicts with current state.
    ///
    /// Examples: combat already active, dungeon already active, session ended
    StateConflict,

    /// Not enough mana, gold, points or items for an explicitly required action.
    InsufficientResource,
}

impl ErrorKind {
    /// Returns a human-readable description of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::StateConflict => "state_conflict",
            Self::InsufficientResource => "insufficient_resource",
        }
    }

    /// Returns true if the caller supplied bad input and should not retry unchanged.
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation | Self::NotFound)
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify kind by what the caller has to change, not by impact
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the category of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
