// match metadata lookups + slot resolution
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::record::Entry;
use crate::core::types::{PlayerSlot, Slot};

/// Slots per team; slots at or above this belong to the second team.
pub const TEAM_SIZE: Slot = 5;
/// Player-slot code of the first player on the second team.
pub const SECOND_TEAM_BASE: PlayerSlot = 128;

/// Static tables supplied by the metadata resolver, read-only for a whole pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchMeta {
    pub hero_to_slot: HashMap<String, Slot>,
    pub slot_to_playerslot: HashMap<Slot, PlayerSlot>,
}

impl MatchMeta {
    pub fn new(
        hero_to_slot: HashMap<String, Slot>,
        slot_to_playerslot: HashMap<Slot, PlayerSlot>,
    ) -> Self {
        Self { hero_to_slot, slot_to_playerslot }
    }

    /// Builds both tables from (hero unit name, slot) pairs using the
    /// standard encoding: slots 0-4 keep their number, 5-9 become 128-132.
    pub fn from_roster<I, S>(roster: I) -> Self
    where
        I: IntoIterator<Item = (S, Slot)>,
        S: Into<String>,
    {
        let mut meta = Self::default();
        for (hero, slot) in roster {
            meta.hero_to_slot.insert(hero.into(), slot);
            meta.slot_to_playerslot.insert(slot, standard_player_slot(slot));
        }
        meta
    }

    pub fn slot_of(&self, unit: &str) -> Option<Slot> {
        self.hero_to_slot.get(unit).copied()
    }

    pub fn player_slot_of(&self, slot: Slot) -> Option<PlayerSlot> {
        self.slot_to_playerslot.get(&slot).copied()
    }

    /// Fills `slot` (unless pinned) and `player_slot` on an entry.
    ///
    /// Non-hero units (creeps, buildings) have no slot; the entry then
    /// carries no slot and no player slot, which downstream reads as a
    /// non-player record.
    pub fn resolve(&self, entry: &mut Entry) {
        if !entry.is_slot_pinned() {
            entry.slot = entry.unit.as_deref().and_then(|u| self.slot_of(u));
        }
        entry.player_slot = entry.slot.and_then(|s| self.player_slot_of(s));
    }
}

/// Reads a slot the way the parser may hand it over: an integer, a
/// whole-number float, or an integer in a string ("5").
pub fn slot_from_value(v: &Value) -> Option<Slot> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as Slot)
        }),
        Value::String(s) => s.trim().parse::<Slot>().ok(),
        _ => None,
    }
}

pub fn standard_player_slot(slot: Slot) -> PlayerSlot {
    if slot < TEAM_SIZE {
        slot
    } else {
        SECOND_TEAM_BASE + (slot - TEAM_SIZE)
    }
}
