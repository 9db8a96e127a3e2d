//! Effect and ability catalog loaders.
//!
//! Effects are defined once in their own catalog and referenced by name from
//! abilities, so several abilities can share one definition:
//!
//! ```text
//! effects.ron    (effects: [(name: "Poison", effect_type: damage, ...)])
//! abilities.ron  (abilities: [(id: AbilityId(1), ..., effects: ["Poison"])])
//! ```

use std::collections::HashMap;
use std::path::Path;

use combat_core::{Ability, AbilityEffectDef, AbilityId, AbilityKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Effect catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectCatalog {
    pub effects: Vec<AbilityEffectDef>,
}

/// Loader for named effect definitions.
pub struct EffectLoader;

impl EffectLoader {
    /// Load effect definitions keyed by name.
    pub fn load(path: &Path) -> LoadResult<HashMap<String, AbilityEffectDef>> {
        let catalog: EffectCatalog = read_ron(path, "effect catalog")?;

        let mut effects = HashMap::with_capacity(catalog.effects.len());
        for def in catalog.effects {
            Self::validate(&def).map_err(|e| {
                anyhow::anyhow!("Invalid effect '{}' in {}: {}", def.name, path.display(), e)
            })?;
            let name = def.name.clone();
            if effects.insert(name.clone(), def).is_some() {
                anyhow::bail!("Duplicate effect '{}' in {}", name, path.display());
            }
        }
        Ok(effects)
    }

    fn validate(def: &AbilityEffectDef) -> LoadResult<()> {
        if def.name.trim().is_empty() {
            anyhow::bail!("name must not be empty");
        }
        if def.value_min > def.value_max {
            anyhow::bail!("value range {}..{} is inverted", def.value_min, def.value_max);
        }
        if !(0.0..=1.0).contains(&def.chance) {
            anyhow::bail!("chance {} is outside [0, 1]", def.chance);
        }
        Ok(())
    }
}

/// Ability as written in the catalog, with effects referenced by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitySpec {
    pub id: AbilityId,
    pub name: String,
    pub mana_cost: u32,
    pub kind: AbilityKind,
    #[serde(default)]
    pub effects: Vec<String>,
}

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilitySpec>,
}

/// Loader for ability catalogs.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load abilities, resolving effect names against `effects`.
    ///
    /// An unknown effect name fails the whole load.
    pub fn load(
        path: &Path,
        effects: &HashMap<String, AbilityEffectDef>,
    ) -> LoadResult<Vec<Ability>> {
        let catalog: AbilityCatalog = read_ron(path, "ability catalog")?;

        let mut abilities: Vec<Ability> = Vec::with_capacity(catalog.abilities.len());
        for spec in catalog.abilities {
            if abilities.iter().any(|a| a.id == spec.id) {
                anyhow::bail!("Duplicate {} in {}", spec.id, path.display());
            }
            let resolved = spec
                .effects
                .iter()
                .map(|name| {
                    effects.get(name).cloned().ok_or_else(|| {
                        anyhow::anyhow!(
                            "Ability '{}' in {} references unknown effect '{}'",
                            spec.name,
                            path.display(),
                            name
                        )
                    })
                })
                .collect::<LoadResult<Vec<_>>>()?;

            abilities.push(Ability {
                id: spec.id,
                name: spec.name,
                mana_cost: spec.mana_cost,
                kind: spec.kind,
                effects: resolved,
            });
        }
        Ok(abilities)
    }
}
