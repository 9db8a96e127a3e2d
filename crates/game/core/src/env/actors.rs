use crate::state::{Ability, AbilityId, Enemy, EnemyId};

/// Oracle providing enemy templates, regular and named.
pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, id: EnemyId) -> Option<&Enemy>;
}

/// Oracle providing ability definitions.
pub trait AbilityOracle: Send + Sync {
    fn ability(&self, id: AbilityId) -> Option<&Ability>;
}
