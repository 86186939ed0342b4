//! Application layer - Use cases and orchestration

pub mod generate;
pub mod init;
pub mod list_tags;

pub use generate::{GenerateOptions, GenerateOutcome, GenerateService, SourceOptions};
pub use list_tags::ListTagsService;
