// type rules: one handler per input category, dispatched on a closed enum
use serde_json::{Number, Value};
use tracing::{debug, trace};

use crate::core::expand::Expander;
use crate::core::record::{Entry, Record};
use crate::core::streams::Expanded;
use crate::core::types::Category;

mod chat;
mod combat;
mod snapshot;

impl Expander<'_> {
    /// Sends one input record through its rule. Everything the rule emits
    /// is routed before this returns.
    pub(crate) fn dispatch(&self, index: usize, record: &Record, out: &mut Expanded) {
        let category = record.category();
        let e = Entry::from_record(record);

        match category {
            Category::Damage => self.damage(e, out),
            Category::Heal => self.heal(e, out),
            Category::ModifierAdd => self.modifier_add(e, out),
            Category::Death => self.death(e, out),
            Category::Ability => self.usage(e, "ability_uses", out),
            Category::Item => self.usage(e, "item_uses", out),
            Category::Gold => self.reason(e, "gold_reason", "gold_reasons", out),
            Category::Xp => self.reason(e, "xp_reason", "xp_reasons", out),
            Category::Purchase => self.purchase(e, out),
            Category::Buyback => self.buyback(e, out),
            Category::MultiKill => self.streak(e, "multi_kills", out),
            Category::KillStreak => self.streak(e, "kill_streaks", out),
            Category::Location => {
                //never seen in real replays
                debug!(time = ?e.seconds(), "combat log location record dropped");
            }

            Category::RunePickup => self.rune_pickup(e, out),
            Category::TowerKill | Category::TowerDeny => self.tower(e, out),
            Category::BarracksKill => self.barracks(e, out),
            Category::FirstBloodChat
            | Category::Aegis
            | Category::AegisStolen
            | Category::DeniedAegis => self.player_chat(e, out),
            Category::RoshanKill => self.roshan(e, out),

            Category::Pings => self.pings(e, out),
            Category::Clicks | Category::Actions | Category::Chat => self.route(e, out),
            Category::Interval => self.interval(e, out),
            Category::Obs | Category::Sen | Category::ObsLeft | Category::SenLeft => {
                self.ward(index, category, e, out)
            }

            Category::ModifierRemove
            | Category::GameState
            | Category::AbilityTrigger
            | Category::PlayerStats
            | Category::TeamBuildingKill
            | Category::FirstBlood
            | Category::ModifierRefresh
            | Category::RuneBottle
            | Category::HeroKill
            | Category::GlyphUsed
            | Category::Paused => {
                trace!(kind = %e.kind, tag = ?dropped_tag(&category), "record carries no signal, dropped");
            }

            Category::Other(_) => self.route(e, out),
        }
    }
}

/// Output tag of categories that are classified but never emitted.
pub fn dropped_tag(category: &Category) -> Option<&'static str> {
    match category {
        Category::ModifierRemove => Some("modifier_lost"),
        Category::GameState => Some("state"),
        Category::AbilityTrigger => Some("ability_trigger"),
        Category::PlayerStats => Some("player_stats"),
        Category::TeamBuildingKill => Some("team_building_kill"),
        Category::FirstBlood => Some("first_blood"),
        Category::ModifierRefresh => Some("modifier_refresh"),
        _ => None,
    }
}

pub(crate) fn opt_key(s: Option<String>) -> Value {
    s.map(Value::String).unwrap_or(Value::Null)
}

//chat values become string keys ("3", not 3); missing stays missing
pub(crate) fn stringify(v: &Value) -> Value {
    match v {
        Value::Null => Value::Null,
        Value::String(s) => Value::String(s.clone()),
        Value::Number(n) => Value::String(number_text(n)),
        other => Value::String(other.to_string()),
    }
}

//whole floats print without a fraction (3.0 -> "3", -0.0 -> "0")
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            format!("{:.0}", f + 0.0)
        }
        _ => n.to_string(),
    }
}
