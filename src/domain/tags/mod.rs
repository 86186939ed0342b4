//! Tag system

pub mod aggregator;
pub mod description;
pub mod identity;

// Re-export main types
pub use aggregator::{TagAggregator, TagRecord, TagRegistry};
pub use description::DescriptionComposer;
pub use identity::TagIdentity;
