// periodic player snapshots + ward placements
use serde_json::Value;
use tracing::warn;

use crate::core::error::{ExpandError, RecordFault};
use crate::core::expand::Expander;
use crate::core::record::Entry;
use crate::core::streams::Expanded;
use crate::core::types::Category;

/// Per-snapshot counters, each emitted as its own record type.
pub const SUB_METRICS: [&str; 7] = [
    "stuns",
    "life_state",
    "obs_placed",
    "sen_placed",
    "creeps_stacked",
    "camps_stacked",
    "rune_pickups",
];

/// (record type, snapshot field) sampled on every minute boundary.
/// `None` samples the snapshot time itself.
pub const MINUTE_SAMPLES: [(&str, Option<&str>); 5] = [
    ("times", None),
    ("gold_t", Some("gold")),
    ("xp_t", Some("xp")),
    ("lh_t", Some("lh")),
    ("dn_t", Some("denies")),
];

/// Lane positions are only kept for the laning stage.
pub const LANE_WINDOW_SECS: f64 = 600.0;

impl Expander<'_> {
    pub(crate) fn interval(&self, e: Entry, out: &mut Expanded) {
        let secs = e.seconds();

        if secs.is_some_and(|t| t >= 0.0) {
            self.route(e.clone(), out);

            for metric in SUB_METRICS {
                let mut m = e.clone();
                m.kind = metric.to_string();
                if metric == "life_state" {
                    m.key = m.field_or_null(metric);
                    m.value = Value::from(1);
                } else {
                    m.key = Value::from(metric);
                    m.value = m.field_or_null(metric);
                }
                self.route(m, out);
            }

            if secs.is_some_and(|t| t % 60.0 == 0.0) {
                for (kind, field) in MINUTE_SAMPLES {
                    let mut s = e.clone();
                    s.interval = true;
                    s.kind = kind.to_string();
                    s.value = match field {
                        Some(f) => s.field_or_null(f),
                        None => s.time.clone().map(Value::Number).unwrap_or(Value::Null),
                    };
                    self.route(s, out);
                }
            }
        }

        //pre-game snapshots still count for lane position
        if secs.is_some_and(|t| t <= LANE_WINDOW_SECS) && e.flag("x") && e.flag("y") {
            let mut pos = e.clone();
            pos.kind = "lane_pos".to_string();
            pos.key = Value::Array(vec![e.field_or_null("x"), e.field_or_null("y")]);
            pos.pos_data = true;
            self.route(pos, out);
        }
    }

    /// Ward placed or expired: always a `_log` copy; placements also get a
    /// record whose key is the decoded position.
    pub(crate) fn ward(&self, index: usize, category: Category, e: Entry, out: &mut Expanded) {
        let mut log = e.clone();
        log.kind = format!("{}_log", e.kind);
        self.route(log, out);

        if !matches!(category, Category::Obs | Category::Sen) {
            return;
        }

        match decode_position(&e) {
            Ok(pos) => {
                let mut placed = e;
                placed.key = pos;
                placed.pos_data = true;
                self.route(placed, out);
            }
            Err(error) => {
                warn!(index, kind = %e.kind, %error, "ward placement skipped");
                out.fault(RecordFault { index, category, error });
            }
        }
    }
}

/// The parser hands ward positions over as JSON text, e.g. `"[118,140]"`.
/// Whatever the text decodes to becomes the key; already-structured keys
/// are taken as they are.
pub fn decode_position(e: &Entry) -> Result<Value, ExpandError> {
    let time = e.seconds();
    match &e.key {
        Value::Null => Err(ExpandError::MissingPosition { time }),
        Value::String(raw) => serde_json::from_str::<Value>(raw).map_err(|source| {
            ExpandError::MalformedPosition {
                time,
                raw: raw.clone(),
                source,
            }
        }),
        other => Ok(other.clone()),
    }
}
