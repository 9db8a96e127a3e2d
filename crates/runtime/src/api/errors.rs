//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the combat rules, repositories and content loading so
//! clients can bubble them up with consistent context.
use thiserror::Error;

use combat_core::{
    CharacterError, CharacterId, CombatError, DungeonRunId, EngineError, ErrorKind, SessionId,
};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Character(#[from] CharacterError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{character} is already in combat ({session})")]
    CombatAlreadyActive {
        character: CharacterId,
        session: SessionId,
    },

    #[error("{character} is already in a dungeon ({run})")]
    DungeonAlreadyActive {
        character: CharacterId,
        run: DungeonRunId,
    },

    #[error("dungeon {run} is not active for {character}")]
    DungeonRunNotActive {
        character: CharacterId,
        run: DungeonRunId,
    },

    #[error("failed to load content: {0}")]
    Content(String),

    #[error("worker task failed: {0}")]
    Worker(String),
}

impl ServiceError {
    /// User-facing category of the error.
    ///
    /// Returns `None` for infrastructure failures (repository, content) that
    /// are not caused by the request itself.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Combat(err) => Some(err.kind()),
            Self::Character(err) => Some(err.kind()),
            Self::CombatAlreadyActive { .. } | Self::DungeonAlreadyActive { .. } => {
                Some(ErrorKind::StateConflict)
            }
            Self::DungeonRunNotActive { .. } => Some(ErrorKind::NotFound),
            Self::Repository(_) | Self::Content(_) | Self::Worker(_) => None,
        }
    }

    /// Shorthand for the not-found error raised when a character is missing.
    pub(crate) fn character_not_found(character: CharacterId) -> Self {
        Self::Combat(CombatError::CharacterNotFound { character })
    }
}
