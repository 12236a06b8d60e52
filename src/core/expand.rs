/*
Pipeline driver.

Inputs:

    records   (parsed replay records, ordered by occurrence time)

    meta      (hero_to_slot + slot_to_playerslot)

    streams   (named sequences with their allow-sets)

Outputs:

    Expanded  (sequence name -> entries in emission order, plus record faults)

One forward pass, no lookahead: record i and everything it emits is routed
before record i+1 is looked at.
*/
use tracing::debug;

use crate::core::meta::MatchMeta;
use crate::core::record::{Entry, Record};
use crate::core::streams::{Expanded, StreamSet};

/// Expansion engine bound to one match's metadata and a stream layout.
/// Holds no per-pass state, so one instance can run any number of passes.
#[derive(Debug, Clone)]
pub struct Expander<'m> {
    pub(crate) meta: &'m MatchMeta,
    pub(crate) streams: StreamSet,
}

impl<'m> Expander<'m> {
    pub fn new(meta: &'m MatchMeta, streams: StreamSet) -> Self {
        Self { meta, streams }
    }

    pub fn with_standard_streams(meta: &'m MatchMeta) -> Self {
        Self::new(meta, StreamSet::standard())
    }

    pub fn streams(&self) -> &StreamSet {
        &self.streams
    }

    //run a full pass from scratch over one match
    pub fn run<'r, I>(&self, records: I) -> Expanded
    where
        I: IntoIterator<Item = &'r Record>,
    {
        let mut out = Expanded::for_streams(&self.streams);
        let mut seen = 0usize;

        for (index, record) in records.into_iter().enumerate() {
            self.dispatch(index, record, &mut out);
            seen += 1;
        }

        debug!(
            records = seen,
            sequences = out.names().count(),
            faults = out.faults().len(),
            "replay expansion finished"
        );
        out
    }

    /// Routes an entry built outside the rule set (e.g. an epilogue record).
    pub fn route_entry(&self, entry: Entry, out: &mut Expanded) {
        self.route(entry, out);
    }
}

/// One pass with the standard stream layout.
pub fn expand(records: &[Record], meta: &MatchMeta) -> Expanded {
    Expander::with_standard_streams(meta).run(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::streams::{Admit, INT_DATA, PARSED_DATA, TF_DATA, UPLOAD_PROPS};
    use serde_json::json;

    fn mk_meta() -> MatchMeta {
        MatchMeta::from_roster([
            ("npc_dota_hero_sniper", 0),
            ("npc_dota_hero_axe", 5),
            ("npc_dota_hero_lina", 1),
        ])
    }

    fn mk_damage(time: i64, source: &str, target: &str, value: i64) -> Record {
        Record::new("DOTA_COMBATLOG_DAMAGE")
            .with("time", time)
            .with("sourcename", source)
            .with("attackername", source)
            .with("targetname", target)
            .with("targethero", target.starts_with("npc_dota_hero"))
            .with("attackerhero", source.starts_with("npc_dota_hero"))
            .with("targetillusion", false)
            .with("inflictor", "sniper_headshot")
            .with("value", value)
    }

    #[test]
    fn empty_input_still_yields_every_configured_sequence() {
        let meta = mk_meta();
        let out = expand(&[], &meta);

        let names: Vec<&str> = out.names().collect();
        assert_eq!(names.len(), 4);
        for name in [PARSED_DATA, TF_DATA, INT_DATA, UPLOAD_PROPS] {
            assert!(out.contains(name), "{name} must be present");
            assert!(out.get(name).is_empty());
        }
        assert!(out.faults().is_empty());
    }

    #[test]
    fn unmatched_sequences_are_empty_not_absent() {
        let meta = mk_meta();
        let records = vec![Record::new("clicks").with("time", 5).with("unit", "npc_dota_hero_lina")];
        let out = expand(&records, &meta);

        assert_eq!(out.kinds(PARSED_DATA), vec!["clicks"]);
        assert!(out.contains(INT_DATA));
        assert!(out.get(INT_DATA).is_empty());
        assert!(out.get(TF_DATA).is_empty());
    }

    #[test]
    fn derivatives_of_one_record_precede_the_next_record() {
        let meta = mk_meta();
        let records = vec![
            mk_damage(10, "npc_dota_hero_sniper", "npc_dota_hero_axe", 80),
            Record::new("DOTA_COMBATLOG_HEAL")
                .with("time", 11)
                .with("sourcename", "npc_dota_hero_axe")
                .with("targetname", "npc_dota_hero_axe")
                .with("value", 20),
            mk_damage(12, "npc_dota_creep_goodguys_melee", "npc_dota_creep_badguys_melee", 5),
        ];
        let out = expand(&records, &meta);

        assert_eq!(
            out.kinds(PARSED_DATA),
            vec![
                "damage",
                "damage_taken",
                "hero_hits",
                "damage_inflictor",
                "max_hero_hit",
                "damage_inflictor_received",
                "healing",
                "damage",
            ]
        );
        assert_eq!(out.kinds(TF_DATA), vec!["damage", "healing", "damage"]);

        //time never goes backwards inside a sequence for ordered input
        let times: Vec<f64> = out.get(PARSED_DATA).iter().filter_map(|e| e.seconds()).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn the_same_entry_is_shared_across_sequences() {
        let meta = mk_meta();
        let records = vec![Record::new("interval")
            .with("time", 30)
            .with("unit", "npc_dota_hero_lina")
            .with("slot", 1)];
        let out = expand(&records, &meta);

        let a = &out.get(PARSED_DATA)[0];
        let b = &out.get(INT_DATA)[0];
        assert!(std::sync::Arc::ptr_eq(a, b));
        assert_eq!(a.player_slot, Some(1));
    }

    #[test]
    fn unknown_types_pass_through_with_slot_resolution() {
        let meta = mk_meta();
        let records = vec![Record::new("epilogue")
            .with("time", 2400)
            .with("unit", "npc_dota_hero_axe")
            .with("key", "{\"gameInfo\":{}}")];
        let out = expand(&records, &meta);

        let e = &out.get(UPLOAD_PROPS)[0];
        assert_eq!(e.kind, "epilogue");
        assert_eq!(e.key, json!("{\"gameInfo\":{}}"));
        assert_eq!(e.slot, Some(5));
        assert_eq!(e.player_slot, Some(128));
        assert_eq!(out.get(PARSED_DATA).len(), 1);
    }

    #[test]
    fn passthrough_keeps_loosely_typed_slot_and_unit() {
        let meta = mk_meta();
        let records = vec![Record::new("actions").with("slot", "5").with("unit", 7)];
        let out = expand(&records, &meta);

        let e = &out.get(PARSED_DATA)[0];
        assert_eq!(e.kind, "actions");
        assert_eq!(e.slot, Some(5));
        assert_eq!(e.player_slot, Some(128));
        assert_eq!(e.field("unit"), Some(&json!(7)));

        let v = serde_json::to_value(e.as_ref()).unwrap();
        assert_eq!(v["unit"], json!(7));
        assert_eq!(v["slot"], json!(5));
        assert_eq!(v["player_slot"], json!(128));
    }

    #[test]
    fn custom_stream_layout_is_honoured() {
        let meta = mk_meta();
        let streams = StreamSet::new()
            .with("kills", Admit::only(["killed", "killed_by"]))
            .with("everything", Admit::All);
        let expander = Expander::new(&meta, streams);

        let records = vec![Record::new("DOTA_COMBATLOG_DEATH")
            .with("time", 120)
            .with("sourcename", "npc_dota_hero_sniper")
            .with("attackername", "npc_dota_hero_sniper")
            .with("targetname", "npc_dota_hero_axe")
            .with("targethero", true)
            .with("targetillusion", false)];
        let out = expander.run(&records);

        assert_eq!(out.kinds("kills"), vec!["killed", "killed_by"]);
        assert_eq!(out.kinds("everything"), vec!["killed", "kills_log", "killed_by"]);
        assert!(!out.contains(PARSED_DATA));
    }

    #[test]
    fn route_entry_resolves_and_fans_out() {
        let meta = mk_meta();
        let expander = Expander::with_standard_streams(&meta);
        let mut out = Expanded::for_streams(expander.streams());

        let mut e = Entry::synthetic("epilogue", None);
        e.unit = Some("npc_dota_hero_sniper".to_string());
        expander.route_entry(e, &mut out);

        assert_eq!(out.kinds(UPLOAD_PROPS), vec!["epilogue"]);
        assert_eq!(out.get(PARSED_DATA)[0].slot, Some(0));
    }
}
