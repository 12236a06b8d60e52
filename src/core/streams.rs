// named output sequences: allow-sets + the accumulator a pass fills
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::core::error::RecordFault;
use crate::core::record::Entry;

pub const PARSED_DATA: &str = "parsed_data";
pub const TF_DATA: &str = "tf_data";
pub const INT_DATA: &str = "int_data";
pub const UPLOAD_PROPS: &str = "uploadProps";

const TF_TYPES: [&str; 9] = [
    "killed",
    "interval",
    "buyback_log",
    "damage",
    "healing",
    "gold_reasons",
    "xp_reasons",
    "ability_uses",
    "item_uses",
];

/// Membership rule of one named sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admit {
    All,
    Only(BTreeSet<String>),
}

impl Admit {
    pub fn only<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Admit::Only(types.into_iter().map(Into::into).collect())
    }

    pub fn admits(&self, kind: &str) -> bool {
        match self {
            Admit::All => true,
            Admit::Only(set) => set.contains(kind),
        }
    }
}

/// The named sequences a pass writes to, in declaration order.
/// Fixed once built; an `Expander` only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamSet {
    streams: Vec<(String, Admit)>,
}

impl StreamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference layout: one unrestricted sequence and three narrow ones.
    pub fn standard() -> Self {
        Self::new()
            .with(PARSED_DATA, Admit::All)
            .with(TF_DATA, Admit::only(TF_TYPES))
            .with(INT_DATA, Admit::only(["interval"]))
            .with(UPLOAD_PROPS, Admit::only(["epilogue", "interval"]))
    }

    /// Adds a sequence; re-declaring a name replaces its rule in place.
    pub fn with(mut self, name: &str, admit: Admit) -> Self {
        match self.streams.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => existing.1 = admit,
            None => self.streams.push((name.to_string(), admit)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Admit)> + '_ {
        self.streams.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn get(&self, name: &str) -> Option<&Admit> {
        self.streams.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

/// Result of one pass: every configured sequence, plus per-record faults.
///
/// All sequences of the `StreamSet` are present from the start, so a
/// sequence nothing matched is empty rather than missing.
#[derive(Debug, Default)]
pub struct Expanded {
    streams: BTreeMap<String, Vec<Arc<Entry>>>,
    faults: Vec<RecordFault>,
}

impl Expanded {
    pub fn for_streams(set: &StreamSet) -> Self {
        Self {
            streams: set.iter().map(|(n, _)| (n.to_string(), Vec::new())).collect(),
            faults: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, name: &str, entry: Arc<Entry>) {
        self.streams.entry(name.to_string()).or_default().push(entry);
    }

    pub(crate) fn fault(&mut self, fault: RecordFault) {
        self.faults.push(fault);
    }

    /// Entries of one sequence in emission order; empty for unknown names.
    pub fn get(&self, name: &str) -> &[Arc<Entry>] {
        self.streams.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.streams.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.streams.keys().map(String::as_str)
    }

    /// Tags of one sequence, handy for asserting emission order.
    pub fn kinds(&self, name: &str) -> Vec<&str> {
        self.get(name).iter().map(|e| e.kind.as_str()).collect()
    }

    pub fn faults(&self) -> &[RecordFault] {
        &self.faults
    }

    /// Hands the sequences over to the writer, dropping recorded faults.
    pub fn into_streams(self) -> BTreeMap<String, Vec<Arc<Entry>>> {
        self.streams
    }
}
