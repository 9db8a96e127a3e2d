//! Effective stat resolution.
//!
//! Calculation order:
//! `Base → + Equipment (summed per stat) → + Buff/Debuff totals`
//!
//! Debuffs carry negative amounts, so the effect totals are a signed sum and
//! are simply added. Nothing here is stored; callers recompute on demand.

use super::core::StatBlock;

/// Pure stat resolution.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatResolver;

impl StatResolver {
    /// Combine base attributes, per-item equipment bonuses and signed
    /// active-effect totals into the effective stat block.
    pub fn effective_stats<'a>(
        base: &StatBlock,
        equipment_bonuses: impl IntoIterator<Item = &'a StatBlock>,
        effect_totals: &StatBlock,
    ) -> StatBlock {
        let equipment = equipment_bonuses
            .into_iter()
            .fold(StatBlock::ZERO, |acc, bonus| acc.plus(bonus));

        base.plus(&equipment).plus(effect_totals)
    }
}
