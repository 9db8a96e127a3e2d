use crate::error::{EngineError, ErrorKind};
use crate::stats::Stat;

/// Errors raised while creating or mutating character records outside combat.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    #[error("no stat points available to assign")]
    NoStatPoints,

    #[error("unknown or unassignable stat '{name}'")]
    InvalidStat { name: String },

    #[error("character name must be 1-{max} characters, got {len}")]
    InvalidName { len: usize, max: usize },
}

impl CharacterError {
    pub(crate) fn invalid_stat(stat: Stat) -> Self {
        Self::InvalidStat {
            name: stat.to_string(),
        }
    }
}

impl EngineError for CharacterError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NoStatPoints => ErrorKind::InsufficientResource,
            Self::InvalidStat { .. } | Self::InvalidName { .. } => ErrorKind::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoStatPoints => "CHARACTER_NO_STAT_POINTS",
            Self::InvalidStat { .. } => "CHARACTER_INVALID_STAT",
            Self::InvalidName { .. } => "CHARACTER_INVALID_NAME",
        }
    }
}
