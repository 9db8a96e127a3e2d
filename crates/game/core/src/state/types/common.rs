use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident($inner:ty), $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Persistent identifier of a player character.
    CharacterId(u32),
    "character"
);
id_type!(
    /// Identifier of a regular mob template.
    MobId(u32),
    "mob"
);
id_type!(
    /// Identifier of a named (unique) mob template.
    NamedMobId(u32),
    "named"
);
id_type!(
    /// Identifier of an ability definition.
    AbilityId(u32),
    "ability"
);
id_type!(
    /// Identifier of an item definition.
    ItemId(u32),
    "item"
);
id_type!(
    /// Identifier of a combat session.
    SessionId(u64),
    "session"
);
id_type!(
    /// Identifier of a dungeon definition.
    DungeonId(u32),
    "dungeon"
);
id_type!(
    /// Identifier of one attempt at a dungeon.
    DungeonRunId(u64),
    "run"
);
id_type!(
    /// Identifier of an active effect, unique within its effect set.
    EffectId(u64),
    "effect"
);

/// Reference to an enemy template, regular or named.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyId {
    Regular(MobId),
    Named(NamedMobId),
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnemyId::Regular(id) => id.fmt(f),
            EnemyId::Named(id) => id.fmt(f),
        }
    }
}

/// Caller-supplied instant, in whole seconds.
///
/// The engine never reads a clock; every time-dependent operation receives the
/// current timestamp from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    pub fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Seconds from `self` until `later`, zero if `later` has already passed.
    pub fn until(self, later: Timestamp) -> u64 {
        later.0.saturating_sub(self.0)
    }
}

impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;
    fn add(self, rhs: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(rhs))
    }
}

impl std::ops::AddAssign<u64> for Timestamp {
    fn add_assign(&mut self, rhs: u64) {
        self.0 = self.0.saturating_add(rhs);
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}s", self.0)
    }
}

/// Which participant of a combat an effect targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    /// The character acting in the session.
    Attacker,
    /// The enemy the character is fighting.
    Enemy,
}
