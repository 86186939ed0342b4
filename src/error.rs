//! Error types for taginfo-gen

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for taginfo-gen
#[derive(Debug, Error)]
pub enum TagInfoError {
    #[error("Unknown element type: {0}")]
    UnknownElementType(String),

    #[error("Catalog not found: {0}")]
    CatalogNotFound(PathBuf),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl TagInfoError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TagInfoError::UnknownElementType(_) => 2,
            TagInfoError::CatalogNotFound(_) | TagInfoError::Catalog(_) => 3,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TagInfoError::UnknownElementType(token) => {
                format!(
                    "Unknown element type: '{}'\n\n\
                    Valid element types:\n\
                    • Node, OpenWay, ClosedWay, Relation\n\
                    • A list of these, e.g. [\"Node\", \"ClosedWay\"]\n\
                    • Omit osm_element to apply a question to every object type",
                    token
                )
            }
            TagInfoError::CatalogNotFound(path) => {
                format!(
                    "Catalog not found: {}\n\n\
                    Suggestions:\n\
                    • Check the --catalog path\n\
                    • Pass a directory to read every *.json file inside it",
                    path.display()
                )
            }
            TagInfoError::Config(msg) => {
                if msg.contains("not found") {
                    format!(
                        "{}\n\n\
                        Suggestions:\n\
                        • Run 'taginfo-gen init' to write a default taginfo.toml\n\
                        • Unset TAGINFO_CONFIG to fall back to the built-in defaults",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TagInfoError
pub type Result<T> = std::result::Result<T, TagInfoError>;
