// input records and the normalized entries produced from them
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::core::meta::slot_from_value;
use crate::core::types::{Category, PlayerSlot, Slot};

/// Field names that `Entry` lifts into typed columns.
const TYPED_FIELDS: [&str; 10] = [
    "type",
    "time",
    "unit",
    "key",
    "value",
    "slot",
    "player_slot",
    "interval",
    "posData",
    "max",
];

/// One parsed replay record: an open mapping with at least `type` and `time`.
///
/// Accessors follow loose JSON semantics. A missing or mistyped field reads
/// as absent, never as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(kind: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("type".to_string(), Value::from(kind));
        Self { fields }
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// `None` when the value is not a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn kind(&self) -> &str {
        self.str_field("type").unwrap_or_default()
    }

    pub fn category(&self) -> Category {
        Category::parse(self.kind())
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn time(&self) -> Option<f64> {
        self.fields.get("time").and_then(Value::as_f64)
    }

    //truthiness: false/0/""/null/missing are all false
    pub fn flag(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(truthy)
    }
}

pub(crate) fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A normalized record on its way to (or already inside) the output sequences.
///
/// `kind` is the output category tag. Every field of the triggering record
/// that has no typed column is carried in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub key: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<Slot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_slot: Option<PlayerSlot>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub interval: bool,
    #[serde(rename = "posData", skip_serializing_if = "std::ops::Not::not")]
    pub pos_data: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub max: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    //true once a slot was supplied explicitly; the router then keeps it
    #[serde(skip)]
    pub(crate) slot_pinned: bool,
}

impl Entry {
    /// Fresh record with no carried fields (reversed perspectives, hit counts).
    pub fn synthetic(kind: &str, time: Option<Number>) -> Self {
        Self {
            kind: kind.to_string(),
            time,
            unit: None,
            key: Value::Null,
            value: Value::Null,
            slot: None,
            player_slot: None,
            interval: false,
            pos_data: false,
            max: false,
            fields: Map::new(),
            slot_pinned: false,
        }
    }

    /// Value copy of an input record. A `slot` already on the record pins it.
    pub fn from_record(record: &Record) -> Self {
        let mut fields = record.fields.clone();
        let mut lifted: Vec<Option<Value>> = TYPED_FIELDS
            .iter()
            .map(|name| fields.remove(*name))
            .collect();
        let mut take = |i: usize| lifted[i].take();

        //anything that does not fit its column goes back untouched
        let mut restore = |name: &str, raw: Value| {
            fields.insert(name.to_string(), raw);
        };

        let kind = match take(0) {
            Some(Value::String(s)) => s,
            Some(raw) => {
                restore("type", raw);
                String::new()
            }
            None => String::new(),
        };
        let time = match take(1) {
            Some(Value::Number(n)) => Some(n),
            Some(raw) => {
                restore("time", raw);
                None
            }
            None => None,
        };
        let unit = match take(2) {
            Some(Value::String(s)) => Some(s),
            Some(raw) => {
                restore("unit", raw);
                None
            }
            None => None,
        };
        let key = take(3).unwrap_or(Value::Null);
        let value = take(4).unwrap_or(Value::Null);
        let slot_field = take(5);
        let slot_pinned = slot_field.is_some();
        let slot = match slot_field {
            Some(raw) => {
                let slot = slot_from_value(&raw);
                if slot.is_none() && !raw.is_null() {
                    restore("slot", raw);
                }
                slot
            }
            None => None,
        };
        let player_slot = take(6).as_ref().and_then(slot_from_value);
        let interval = take(7).as_ref().is_some_and(truthy);
        let pos_data = take(8).as_ref().is_some_and(truthy);
        let max = take(9).as_ref().is_some_and(truthy);

        Self {
            kind,
            time,
            unit,
            key,
            value,
            slot,
            player_slot,
            interval,
            pos_data,
            max,
            fields,
            slot_pinned,
        }
    }

    pub fn seconds(&self) -> Option<f64> {
        self.time.as_ref().and_then(Number::as_f64)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(truthy)
    }

    //missing reads as null, same as the loose record model
    pub fn field_or_null(&self, name: &str) -> Value {
        self.fields.get(name).cloned().unwrap_or(Value::Null)
    }

    /// Fixes the slot; the router will not look it up from `unit`.
    pub fn pin_slot(&mut self, slot: Option<Slot>) {
        self.slot = slot;
        self.slot_pinned = true;
    }

    pub fn is_slot_pinned(&self) -> bool {
        self.slot_pinned
    }

    /// Drops raw carried values that a populated column now stands for,
    /// so the serialized entry never holds the same name twice.
    pub(crate) fn settle_columns(&mut self) {
        if !self.kind.is_empty() {
            self.fields.remove("type");
        }
        if self.time.is_some() {
            self.fields.remove("time");
        }
        if self.unit.is_some() {
            self.fields.remove("unit");
        }
        if self.slot.is_some() {
            self.fields.remove("slot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mk_record() -> Record {
        Record::new("DOTA_COMBATLOG_GOLD")
            .with("time", 42)
            .with("targetname", "npc_dota_hero_axe")
            .with("value", 150)
            .with("gold_reason", 11)
    }

    #[test]
    fn record_accessors_are_loose() {
        let r = mk_record().with("targethero", true).with("x", 0);

        assert_eq!(r.kind(), "DOTA_COMBATLOG_GOLD");
        assert_eq!(r.category(), Category::Gold);
        assert_eq!(r.time(), Some(42.0));
        assert_eq!(r.str_field("targetname"), Some("npc_dota_hero_axe"));
        assert_eq!(r.str_field("value"), None);
        assert!(r.flag("targethero"));
        assert!(!r.flag("x"));
        assert!(!r.flag("missing"));
        assert_eq!(Record::default().kind(), "");
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(Record::from_value(json!([1, 2])).is_none());
        let r = Record::from_value(json!({"type": "chat", "time": -30})).unwrap();
        assert_eq!(r.time(), Some(-30.0));
    }

    #[test]
    fn from_record_lifts_typed_columns_and_carries_the_rest() {
        let e = Entry::from_record(&mk_record());

        assert_eq!(e.kind, "DOTA_COMBATLOG_GOLD");
        assert_eq!(e.time, Some(Number::from(42)));
        assert_eq!(e.value, json!(150));
        assert_eq!(e.key, Value::Null);
        assert_eq!(e.unit, None);
        assert!(!e.is_slot_pinned());
        assert_eq!(e.field("gold_reason"), Some(&json!(11)));
        assert!(e.field("value").is_none());
        assert!(e.field("type").is_none());
    }

    #[test]
    fn slot_on_input_pins_even_when_null() {
        let e = Entry::from_record(&Record::new("interval").with("slot", 3));
        assert!(e.is_slot_pinned());
        assert_eq!(e.slot, Some(3));

        let e = Entry::from_record(&Record::new("chat").with("slot", Value::Null));
        assert!(e.is_slot_pinned());
        assert_eq!(e.slot, None);
    }

    #[test]
    fn loose_slot_and_unit_shapes_survive_the_copy() {
        let e = Entry::from_record(&Record::new("actions").with("slot", "5").with("unit", 7));
        assert!(e.is_slot_pinned());
        assert_eq!(e.slot, Some(5));
        assert_eq!(e.unit, None);
        assert_eq!(e.field("unit"), Some(&json!(7)));
        assert!(e.field("slot").is_none());

        let e = Entry::from_record(&Record::new("actions").with("slot", "abc").with("time", "late"));
        assert!(e.is_slot_pinned());
        assert_eq!(e.slot, None);
        assert_eq!(e.time, None);
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["slot"], json!("abc"));
        assert_eq!(v["time"], json!("late"));
    }

    #[test]
    fn settled_columns_shadow_carried_raw_values() {
        let mut e = Entry::from_record(&Record::new("actions").with("unit", 7));
        e.unit = Some("npc_dota_hero_axe".to_string());
        e.settle_columns();

        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["unit"], json!("npc_dota_hero_axe"));
        assert!(e.field("unit").is_none());
    }

    #[test]
    fn copies_do_not_share_state() {
        let original = Entry::from_record(&mk_record());
        let mut copy = original.clone();
        copy.kind = "purchase_log".to_string();
        copy.fields.insert("gold_reason".to_string(), json!(0));

        assert_eq!(original.kind, "DOTA_COMBATLOG_GOLD");
        assert_eq!(original.field("gold_reason"), Some(&json!(11)));
    }

    #[test]
    fn entry_serializes_with_wire_names() {
        let mut e = Entry::synthetic("lane_pos", Some(Number::from(30)));
        e.key = json!([80, 120]);
        e.pos_data = true;
        e.pin_slot(Some(2));

        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["type"], json!("lane_pos"));
        assert_eq!(v["posData"], json!(true));
        assert_eq!(v["slot"], json!(2));
        assert!(v.get("max").is_none());
        assert!(v.get("slot_pinned").is_none());
    }
}
