use thiserror::Error;

use crate::core::types::Category;

#[derive(Debug, Error)]
pub enum ExpandError {
    /// A ward placement whose string-encoded key is not valid position JSON.
    #[error("malformed ward position {raw:?} at time {time:?}: {source}")]
    MalformedPosition {
        time: Option<f64>,
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// Ward placement with no position at all (key missing or null).
    #[error("ward placement at time {time:?} carries no position")]
    MissingPosition { time: Option<f64> },

    #[error("stream config could not be decoded: {0}")]
    ConfigDecode(String),

    #[error("stream config could not be encoded: {0}")]
    ConfigEncode(String),

    #[error("stream name must not be empty")]
    EmptyStreamName,

    #[error("stream {0:?} is declared more than once")]
    DuplicateStream(String),

    #[error("stream {0:?} admits all types but also lists an allow-set")]
    AmbiguousAdmit(String),
}

/// An error bounded to one input record. The pass goes on without it.
#[derive(Debug)]
pub struct RecordFault {
    /// Position of the offending record in the input sequence.
    pub index: usize,
    pub category: Category,
    pub error: ExpandError,
}
