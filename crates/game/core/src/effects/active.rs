//! Active status effects on the participants of a combat session.
//!
//! # Time-based Duration
//!
//! Effects store `expires_at: Timestamp`. The host calls [`EffectSet::update`]
//! on its own cadence with the current timestamp; nothing here reads a clock.
//!
//! # Lifecycle
//!
//! ```text
//! Active ──(expiry / tick exhaustion)──► Removed
//! Active ──(add_or_stack, same name+type+side)──► Active (refreshed)
//! ```
//!
//! Recasting refreshes in place; `stacks` stays at 1.

use strum::{Display, IntoStaticStr};

use crate::state::{EffectId, Side, Timestamp};
use crate::stats::{Stat, StatBlock};

/// Shape of an active effect, used for identity and presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ActiveEffectType {
    Buff,
    Debuff,
    Dot,
    Hot,
    Shield,
}

/// Tick schedule of a DOT/HOT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodicState {
    pub tick_value: u32,
    pub tick_interval: u64,
    pub ticks_remaining: u32,
    pub next_tick_at: Timestamp,
    /// Timestamp of the last applied tick; guards against a second tick for
    /// the same `now`.
    pub last_tick_at: Option<Timestamp>,
}

impl PeriodicState {
    fn is_due(&self, now: Timestamp) -> bool {
        self.ticks_remaining > 0
            && self.next_tick_at <= now
            && self.last_tick_at.is_none_or(|last| last < now)
    }
}

/// Variant-specific payload of an active effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActiveEffectKind {
    /// Positive stat modifier.
    Buff { stat: Stat, amount: i32 },
    /// Stat modifier stored as a negative amount.
    Debuff { stat: Stat, amount: i32 },
    Dot(PeriodicState),
    Hot(PeriodicState),
    Shield { remaining: u32 },
}

/// A single status effect instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    /// Assigned by [`EffectSet::add_or_stack`]; default until the effect is stored.
    pub id: EffectId,
    pub name: String,
    /// Name of the ability (or other source) that applied the effect.
    pub source: String,
    pub target: Side,
    /// Lifetime in seconds granted by the latest application.
    pub duration: u64,
    pub expires_at: Timestamp,
    pub stacks: u32,
    pub kind: ActiveEffectKind,
}

impl ActiveEffect {
    pub fn effect_type(&self) -> ActiveEffectType {
        match self.kind {
            ActiveEffectKind::Buff { .. } => ActiveEffectType::Buff,
            ActiveEffectKind::Debuff { .. } => ActiveEffectType::Debuff,
            ActiveEffectKind::Dot(_) => ActiveEffectType::Dot,
            ActiveEffectKind::Hot(_) => ActiveEffectType::Hot,
            ActiveEffectKind::Shield { .. } => ActiveEffectType::Shield,
        }
    }

    pub fn periodic(&self) -> Option<&PeriodicState> {
        match &self.kind {
            ActiveEffectKind::Dot(p) | ActiveEffectKind::Hot(p) => Some(p),
            _ => None,
        }
    }

    fn periodic_mut(&mut self) -> Option<&mut PeriodicState> {
        match &mut self.kind {
            ActiveEffectKind::Dot(p) | ActiveEffectKind::Hot(p) => Some(p),
            _ => None,
        }
    }

    /// Signed contribution to `stat`; zero for non-modifier effects.
    pub fn stat_modifier(&self, stat: Stat) -> i32 {
        match self.kind {
            ActiveEffectKind::Buff { stat: s, amount } | ActiveEffectKind::Debuff { stat: s, amount }
                if s == stat =>
            {
                amount
            }
            _ => 0,
        }
    }

    fn same_identity(&self, other: &ActiveEffect) -> bool {
        self.target == other.target
            && self.name == other.name
            && self.effect_type() == other.effect_type()
    }
}

/// Outcome of [`EffectSet::add_or_stack`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackOutcome {
    Added(EffectId),
    Refreshed(EffectId),
}

impl StackOutcome {
    pub fn id(&self) -> EffectId {
        match *self {
            StackOutcome::Added(id) | StackOutcome::Refreshed(id) => id,
        }
    }
}

/// Presentation row for the live effects list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectView {
    pub name: String,
    pub effect_type: ActiveEffectType,
    pub target: Side,
    /// Seconds until expiry, saturating at zero.
    pub remaining: u64,
    pub stacks: u32,
}

/// Active status effects of one combat session, both sides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSet {
    effects: Vec<ActiveEffect>,
    next_id: u64,
}

impl EffectSet {
    /// Creates an empty effect set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds an effect, or refreshes the existing effect with the same
    /// `(name, type)` on the same side.
    ///
    /// A refresh keeps the existing id, moves `expires_at` forward only,
    /// adopts the incoming duration and payload, and restarts the tick
    /// schedule of periodic effects. It never produces a second instance.
    pub fn add_or_stack(&mut self, incoming: ActiveEffect) -> StackOutcome {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.same_identity(&incoming)) {
            existing.expires_at = existing.expires_at.max(incoming.expires_at);
            existing.duration = incoming.duration;
            existing.source = incoming.source;
            existing.kind = incoming.kind;
            existing.stacks = 1;
            return StackOutcome::Refreshed(existing.id);
        }

        self.next_id += 1;
        let id = EffectId(self.next_id);
        self.effects.push(ActiveEffect {
            id,
            stacks: 1,
            ..incoming
        });
        StackOutcome::Added(id)
    }

    /// Advances effects to `now`.
    ///
    /// - A periodic effect whose tick is due fires `on_tick(effect, tick_value)`
    ///   once, then is rescheduled or dropped when its ticks run out. At most
    ///   one tick is applied per effect per call, even if several intervals
    ///   have elapsed, and never twice for the same `now`.
    /// - Any effect is removed once `expires_at <= now`. A periodic effect
    ///   gets its due tick first, so a late call still applies one final
    ///   tick before the effect leaves the set. Running out of ticks also
    ///   removes it.
    ///
    /// Returns the removed effects, in set order.
    pub fn update(
        &mut self,
        now: Timestamp,
        mut on_tick: impl FnMut(&ActiveEffect, u32),
    ) -> Vec<ActiveEffect> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.effects.len());

        for mut effect in self.effects.drain(..) {
            let keep = match effect.periodic().copied() {
                Some(schedule) => {
                    if schedule.is_due(now) {
                        on_tick(&effect, schedule.tick_value);
                        if let Some(p) = effect.periodic_mut() {
                            p.ticks_remaining -= 1;
                            p.last_tick_at = Some(now);
                            p.next_tick_at += p.tick_interval;
                        }
                    }
                    effect.periodic().is_some_and(|p| p.ticks_remaining > 0)
                        && effect.expires_at > now
                }
                None => effect.expires_at > now,
            };

            if keep {
                kept.push(effect);
            } else {
                removed.push(effect);
            }
        }

        self.effects = kept;
        removed
    }

    /// Removes an effect immediately.
    pub fn remove(&mut self, id: EffectId) -> Option<ActiveEffect> {
        let index = self.effects.iter().position(|e| e.id == id)?;
        Some(self.effects.remove(index))
    }

    /// Sum of Buff/Debuff amounts on `side` for `stat`.
    pub fn total_stat_modifier(&self, side: Side, stat: Stat) -> i32 {
        self.for_side(side).map(|e| e.stat_modifier(stat)).sum()
    }

    /// All signed Buff/Debuff totals on `side`, as a stat block.
    pub fn stat_totals(&self, side: Side) -> StatBlock {
        self.for_side(side)
            .fold(StatBlock::ZERO, |mut acc, effect| match effect.kind {
                ActiveEffectKind::Buff { stat, amount }
                | ActiveEffectKind::Debuff { stat, amount } => {
                    *acc.get_mut(stat) += amount;
                    acc
                }
                _ => acc,
            })
    }

    /// Presentation rows for every effect, at `now`.
    pub fn views(&self, now: Timestamp) -> Vec<EffectView> {
        self.effects
            .iter()
            .map(|e| EffectView {
                name: e.name.clone(),
                effect_type: e.effect_type(),
                target: e.target,
                remaining: now.until(e.expires_at),
                stacks: e.stacks,
            })
            .collect()
    }

    pub fn get(&self, id: EffectId) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.id == id)
    }

    pub fn for_side(&self, side: Side) -> impl Iterator<Item = &ActiveEffect> + '_ {
        self.effects.iter().filter(move |e| e.target == side)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
