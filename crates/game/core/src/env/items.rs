use crate::state::ItemId;

pub trait ItemOracle: Send + Sync {
    fn definition(&self, id: ItemId) -> Option<&ItemDefinition>;

    /// Whether units of `id` merge into one inventory stack.
    ///
    /// Unknown items are treated as unstackable.
    fn is_stackable(&self, id: ItemId) -> bool {
        self.definition(id).is_some_and(|def| def.stackable)
    }
}

/// Item definition; only what loot and inventory merging need.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
}

impl ItemDefinition {
    pub fn new(id: ItemId, name: impl Into<String>, stackable: bool) -> Self {
        Self {
            id,
            name: name.into(),
            stackable,
        }
    }
}
