//! taginfo-gen - taginfo project files from questionnaire catalogs
//!
//! Aggregates the tags a survey question catalog writes into one record per
//! distinct tag, describes which questions add each tag, and publishes a
//! taginfo project document only when its content actually changed.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TagInfoError;
