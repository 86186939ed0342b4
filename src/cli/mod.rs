//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, SourceArgs};
pub use output::{format_outcome, format_tag_list};
