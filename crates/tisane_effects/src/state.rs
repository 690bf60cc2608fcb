//! # Effect State
//!
//! Plain-data container of every active cooldown and buff. The registry
//! owns one and is its only writer; it serializes with serde so a save
//! format can be layered on top later.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::buff::Buff;
use crate::cooldown::Cooldown;

/// Active cooldowns and buffs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectState {
    /// Cooldowns keyed by name. One entry per name.
    pub cooldowns: BTreeMap<String, Cooldown>,
    /// Buffs in insertion order. Duplicate names allowed.
    pub buffs: Vec<Buff>,
}

impl EffectState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no cooldown and no buff is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cooldowns.is_empty() && self.buffs.is_empty()
    }
}
