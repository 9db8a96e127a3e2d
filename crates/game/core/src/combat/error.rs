use crate::error::{EngineError, ErrorKind};
use crate::state::{AbilityId, CharacterId, EnemyId, SessionId};

/// Errors raised by combat resolution.
///
/// Every variant is raised before any state is touched, so a failed call
/// leaves the caller's records exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("no combat session found for {character}")]
    SessionNotFound { character: CharacterId },

    #[error("{session} is not active")]
    NotActive { session: SessionId },

    #[error("{character} not found")]
    CharacterNotFound { character: CharacterId },

    #[error("enemy {enemy} not found")]
    EnemyNotFound { enemy: EnemyId },

    #[error("{ability} not found")]
    AbilityNotFound { ability: AbilityId },

    #[error("{session} belongs to {expected}, not {provided}")]
    SessionMismatch {
        session: SessionId,
        expected: CharacterId,
        provided: CharacterId,
    },
}

impl EngineError for CombatError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::SessionNotFound { .. }
            | Self::CharacterNotFound { .. }
            | Self::EnemyNotFound { .. }
            | Self::AbilityNotFound { .. } => ErrorKind::NotFound,
            Self::NotActive { .. } => ErrorKind::StateConflict,
            Self::SessionMismatch { .. } => ErrorKind::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SessionNotFound { .. } => "COMBAT_SESSION_NOT_FOUND",
            Self::NotActive { .. } => "COMBAT_NOT_ACTIVE",
            Self::CharacterNotFound { .. } => "COMBAT_CHARACTER_NOT_FOUND",
            Self::EnemyNotFound { .. } => "COMBAT_ENEMY_NOT_FOUND",
            Self::AbilityNotFound { .. } => "COMBAT_ABILITY_NOT_FOUND",
            Self::SessionMismatch { .. } => "COMBAT_SESSION_MISMATCH",
        }
    }
}
