// combat log rules
use serde_json::Value;

use crate::core::expand::Expander;
use crate::core::meta::slot_from_value;
use crate::core::normalize::{illusion_key, translate_opt};
use crate::core::record::Entry;
use crate::core::rules::opt_key;
use crate::core::streams::Expanded;

/// Buffs worth reporting when they land on a real hero.
pub const MODIFIER_WHITELIST: [&str; 1] = ["modifier_item_ultimate_scepter_consumed"];

pub const RECIPE_PREFIX: &str = "recipe_";

fn target_key(e: &Entry) -> Option<String> {
    e.str_field("targetname")
        .map(|name| illusion_key(name, e.flag("targetillusion")))
}

impl Expander<'_> {
    /// Damage dealt, plus the reversed and per-inflictor views when a real
    /// hero was hit.
    pub(crate) fn damage(&self, mut e: Entry, out: &mut Expanded) {
        e.unit = e.str_field("sourcename").map(str::to_string);
        let victim = target_key(&e);
        e.key = opt_key(victim.clone());
        e.kind = "damage".to_string();

        let time = e.time.clone();
        let attacker = e.unit.clone();
        let value = e.value.clone();
        let inflictor = translate_opt(e.str_field("inflictor"));
        let real_hero = e.flag("targethero") && !e.flag("targetillusion");
        let attacker_hero = e.flag("attackerhero");
        let self_hit = victim == attacker;
        self.route(e, out);

        if real_hero {
            let mut taken = Entry::synthetic("damage_taken", time.clone());
            taken.unit = victim.clone();
            taken.key = opt_key(attacker.clone());
            taken.value = value.clone();
            self.route(taken, out);

            let mut hits = Entry::synthetic("hero_hits", time.clone());
            hits.unit = attacker.clone();
            hits.key = opt_key(inflictor.clone());
            self.route(hits, out);

            //self damage is not counted below
            if !self_hit {
                let mut inf = Entry::synthetic("damage_inflictor", time.clone());
                inf.unit = attacker.clone();
                inf.key = opt_key(inflictor.clone());
                inf.value = value.clone();
                self.route(inf, out);

                let mut biggest = Entry::synthetic("max_hero_hit", time.clone());
                biggest.max = true;
                biggest
                    .fields
                    .insert("inflictor".to_string(), opt_key(inflictor.clone()));
                biggest.unit = attacker.clone();
                biggest.key = opt_key(victim.clone());
                biggest.value = value.clone();
                self.route(biggest, out);
            }
        }

        if attacker_hero && real_hero && !self_hit {
            let mut received = Entry::synthetic("damage_inflictor_received", time);
            received.unit = victim;
            received.key = opt_key(inflictor);
            received.value = value;
            self.route(received, out);
        }
    }

    pub(crate) fn heal(&self, mut e: Entry, out: &mut Expanded) {
        e.unit = e.str_field("sourcename").map(str::to_string);
        e.key = opt_key(target_key(&e));
        e.kind = "healing".to_string();
        self.route(e, out);
    }

    /// Buff gained. Only whitelisted buffs on real heroes are emitted.
    pub(crate) fn modifier_add(&self, mut e: Entry, out: &mut Expanded) {
        e.unit = e.str_field("attackername").map(str::to_string);
        let buff = translate_opt(e.str_field("inflictor"));
        e.key = opt_key(buff.clone());
        if let Some(target) = target_key(&e) {
            e.fields.insert("targetname".to_string(), Value::String(target));
        }

        let real_hero = e.flag("targethero") && !e.flag("targetillusion");
        let listed = buff.as_deref().is_some_and(|b| MODIFIER_WHITELIST.contains(&b));
        if real_hero && listed {
            e.kind = "modifier_applied".to_string();
            self.route(e, out);
        }
    }

    /// Kill, kill log and the reversed killed-by view.
    pub(crate) fn death(&self, mut e: Entry, out: &mut Expanded) {
        e.unit = e.str_field("sourcename").map(str::to_string);
        let victim = target_key(&e);
        e.key = opt_key(victim.clone());

        //denies and expiries: the attacker is the victim, nothing is emitted
        if e.str_field("attackername") == victim.as_deref() {
            return;
        }
        e.kind = "killed".to_string();
        self.route(e.clone(), out);

        if e.flag("targethero") && !e.flag("targetillusion") {
            let killer = e.unit.clone();
            let time = e.time.clone();

            let mut log = e;
            log.kind = "kills_log".to_string();
            self.route(log, out);

            let mut by = Entry::synthetic("killed_by", time);
            by.unit = victim;
            by.key = opt_key(killer);
            self.route(by, out);
        }
    }

    /// Ability or item use: unit is the caster, key the translated id.
    pub(crate) fn usage(&self, mut e: Entry, kind: &str, out: &mut Expanded) {
        e.unit = e.str_field("attackername").map(str::to_string);
        e.key = opt_key(translate_opt(e.str_field("inflictor")));
        e.kind = kind.to_string();
        self.route(e, out);
    }

    /// Gold or xp change keyed by its reason code.
    pub(crate) fn reason(&self, mut e: Entry, reason_field: &str, kind: &str, out: &mut Expanded) {
        e.unit = e.str_field("targetname").map(str::to_string);
        e.key = e.field_or_null(reason_field);
        e.kind = kind.to_string();
        self.route(e, out);
    }

    /// Purchase, plus a log copy unless the item is a recipe.
    pub(crate) fn purchase(&self, mut e: Entry, out: &mut Expanded) {
        e.unit = e.str_field("targetname").map(str::to_string);
        let item = translate_opt(e.str_field("valuename"));
        e.key = opt_key(item.clone());
        e.value = Value::from(1);
        e.kind = "purchase".to_string();

        let recipe = item.as_deref().is_some_and(|i| i.starts_with(RECIPE_PREFIX));
        if recipe {
            self.route(e, out);
            return;
        }

        let mut log = e.clone();
        log.kind = "purchase_log".to_string();
        self.route(e, out);
        self.route(log, out);
    }

    /// Buyback: the record's value is the slot that bought back.
    pub(crate) fn buyback(&self, mut e: Entry, out: &mut Expanded) {
        let slot = slot_from_value(&e.value);
        e.pin_slot(slot);
        e.kind = "buyback_log".to_string();
        self.route(e, out);
    }

    /// Multi-kill / kill streak: the streak size becomes the key.
    pub(crate) fn streak(&self, mut e: Entry, kind: &str, out: &mut Expanded) {
        e.unit = e.str_field("attackername").map(str::to_string);
        e.key = std::mem::replace(&mut e.value, Value::from(1));
        e.kind = kind.to_string();
        self.route(e, out);
    }
}
