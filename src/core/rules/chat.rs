// chat message rules + parser generated pings
use serde_json::Value;

use crate::core::expand::Expander;
use crate::core::meta::slot_from_value;
use crate::core::record::Entry;
use crate::core::rules::stringify;
use crate::core::streams::Expanded;

fn player1_slot(e: &Entry) -> Option<i64> {
    e.field("player1").and_then(slot_from_value)
}

impl Expander<'_> {
    /// Rune pickup: player1 is the slot, value the rune type.
    pub(crate) fn rune_pickup(&self, mut e: Entry, out: &mut Expanded) {
        e.kind = "runes".to_string();
        let slot = player1_slot(&e);
        e.pin_slot(slot);
        e.key = stringify(&e.value);
        e.value = Value::from(1);
        self.route(e, out);
    }

    /// Tower kill/deny: value is the team, player1 the slot (-1 if no player).
    pub(crate) fn tower(&self, mut e: Entry, out: &mut Expanded) {
        e.fields.insert("team".to_string(), e.value.clone());
        let slot = player1_slot(&e);
        e.pin_slot(slot);
        self.route(e, out);
    }

    //barracks ids are powers of two, bottom melee dire = 1 .. top ranged radiant = 2048
    pub(crate) fn barracks(&self, mut e: Entry, out: &mut Expanded) {
        e.key = stringify(&e.value);
        self.route(e, out);
    }

    /// First blood and aegis events, attributed to player1.
    pub(crate) fn player_chat(&self, mut e: Entry, out: &mut Expanded) {
        let slot = player1_slot(&e);
        e.pin_slot(slot);
        self.route(e, out);
    }

    /// Roshan kill: player1 is the killing team, not a slot.
    pub(crate) fn roshan(&self, mut e: Entry, out: &mut Expanded) {
        let team = e.field_or_null("player1");
        e.fields.insert("team".to_string(), team);
        self.route(e, out);
    }

    pub(crate) fn pings(&self, mut e: Entry, out: &mut Expanded) {
        //pings are not split into subtypes
        e.key = Value::from(0);
        self.route(e, out);
    }
}
