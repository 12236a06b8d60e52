pub mod streams;

pub use streams::{StreamConfig, StreamSpec};
