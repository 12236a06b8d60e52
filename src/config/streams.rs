/*
Stream layout as data.

Input:

    streams.toon   (one entry per named sequence: name, all, types)

Output:

    StreamSet      (validated, declaration order kept)

Rules:

    names are non-empty and unique

    `all: true` admits every type and must not also list types

    `all: false` with no types is a valid, always-empty sequence
*/
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use toon_format::{decode_default, encode_default};

use crate::core::error::ExpandError;
use crate::core::streams::{Admit, StreamSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSpec {
    pub name: String,
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreamConfig {
    pub streams: Vec<StreamSpec>,
}

impl StreamConfig {
    pub fn from_toon(text: &str) -> Result<Self, ExpandError> {
        decode_default(text).map_err(|e| ExpandError::ConfigDecode(e.to_string()))
    }

    pub fn to_toon(&self) -> Result<String, ExpandError> {
        encode_default(self).map_err(|e| ExpandError::ConfigEncode(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ExpandError> {
        let mut seen = HashSet::new();
        for spec in &self.streams {
            if spec.name.trim().is_empty() {
                return Err(ExpandError::EmptyStreamName);
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(ExpandError::DuplicateStream(spec.name.clone()));
            }
            if spec.all && !spec.types.is_empty() {
                return Err(ExpandError::AmbiguousAdmit(spec.name.clone()));
            }
        }
        Ok(())
    }

    pub fn into_stream_set(self) -> Result<StreamSet, ExpandError> {
        self.validate()?;
        let set = self.streams.into_iter().fold(StreamSet::new(), |set, spec| {
            let admit = if spec.all {
                Admit::All
            } else {
                Admit::only(spec.types)
            };
            set.with(&spec.name, admit)
        });
        Ok(set)
    }
}

impl From<&StreamSet> for StreamConfig {
    fn from(set: &StreamSet) -> Self {
        let streams = set
            .iter()
            .map(|(name, admit)| match admit {
                Admit::All => StreamSpec {
                    name: name.to_string(),
                    all: true,
                    types: Vec::new(),
                },
                Admit::Only(types) => StreamSpec {
                    name: name.to_string(),
                    all: false,
                    types: types.iter().cloned().collect(),
                },
            })
            .collect();
        Self { streams }
    }
}

/// Loads and validates a stream layout from TOON text.
pub fn load_stream_set(text: &str) -> Result<StreamSet, ExpandError> {
    StreamConfig::from_toon(text)?.into_stream_set()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::streams::{INT_DATA, PARSED_DATA};

    fn mk_spec(name: &str, all: bool, types: &[&str]) -> StreamSpec {
        StreamSpec {
            name: name.to_string(),
            all,
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn standard_layout_survives_toon_text() {
        let standard = StreamSet::standard();
        let text = StreamConfig::from(&standard).to_toon().unwrap();
        let loaded = load_stream_set(&text).unwrap();

        assert_eq!(loaded, standard);
        assert_eq!(loaded.get(PARSED_DATA), Some(&Admit::All));
        assert!(loaded.get(INT_DATA).unwrap().admits("interval"));
    }

    #[test]
    fn hand_written_layout_loads() {
        let text = "streams[2]:\n  - name: everything\n    all: true\n  - name: kills\n    types[2]: killed,killed_by\n";
        let set = load_stream_set(text).unwrap();

        let names: Vec<&str> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["everything", "kills"]);
        assert_eq!(set.get("everything"), Some(&Admit::All));
        assert_eq!(set.get("kills"), Some(&Admit::only(["killed", "killed_by"])));
    }

    #[test]
    fn rejects_duplicate_empty_and_ambiguous_streams() {
        let dup = StreamConfig {
            streams: vec![mk_spec("a", true, &[]), mk_spec("a", false, &["x"])],
        };
        assert!(matches!(dup.validate(), Err(ExpandError::DuplicateStream(n)) if n == "a"));

        let empty = StreamConfig {
            streams: vec![mk_spec("  ", true, &[])],
        };
        assert!(matches!(empty.validate(), Err(ExpandError::EmptyStreamName)));

        let ambiguous = StreamConfig {
            streams: vec![mk_spec("b", true, &["x"])],
        };
        assert!(matches!(
            ambiguous.into_stream_set(),
            Err(ExpandError::AmbiguousAdmit(n)) if n == "b"
        ));
    }

    #[test]
    fn restricted_stream_without_types_admits_nothing() {
        let cfg = StreamConfig {
            streams: vec![mk_spec("quiet", false, &[])],
        };
        let set = cfg.into_stream_set().unwrap();
        assert!(!set.get("quiet").unwrap().admits("damage"));
    }

    #[test]
    fn stream_without_name_is_a_decode_error() {
        let err = StreamConfig::from_toon("streams[1]:\n  - all: true\n").unwrap_err();
        assert!(matches!(err, ExpandError::ConfigDecode(_)));
    }
}
