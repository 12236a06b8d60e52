pub mod error;
pub mod expand;
pub mod meta;
pub mod normalize;
pub mod record;
pub mod route;
pub mod rules;
pub mod streams;
pub mod types;
