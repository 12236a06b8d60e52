//! Fan-out of a recorded match's telemetry into purpose-specific sequences.
//!
//! One forward pass classifies every parsed replay record, synthesizes the
//! derived records each category calls for (reversed perspectives, logs,
//! per-minute samples), resolves the originating player slot and appends
//! the result to every named output sequence that admits its type.

pub mod config;
pub mod core;

pub use crate::core::error::{ExpandError, RecordFault};
pub use crate::core::expand::{Expander, expand};
pub use crate::core::meta::MatchMeta;
pub use crate::core::record::{Entry, Record};
pub use crate::core::streams::{Admit, Expanded, StreamSet};
pub use crate::core::types::{Category, PlayerSlot, Slot};
pub use crate::config::streams::{StreamConfig, StreamSpec, load_stream_set};
