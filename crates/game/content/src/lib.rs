//! Data-driven combat content and loaders.
//!
//! This crate reads static content from RON/TOML data files:
//! - Effect catalogs (named effect definitions, RON)
//! - Ability catalogs referencing effects by name (RON)
//! - Mob and named-mob catalogs (RON)
//! - Item catalogs (RON)
//! - Loot tables keyed by enemy (RON)
//! - Combat configuration (TOML)
//!
//! Loaded content ends up in a [`combat_core::ContentSnapshot`], which
//! implements every oracle the resolvers read from. Content never appears in
//! combat state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, AbilitySpec, ConfigLoader, ContentFactory, EffectLoader, EnemyLoader,
    ItemLoader, LoadResult, LootTableLoader, LootTableSpec,
};
