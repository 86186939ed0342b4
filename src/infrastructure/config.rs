//! Configuration management

use crate::domain::ProjectMetadata;
use crate::error::{Result, TagInfoError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "taginfo.toml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "TAGINFO_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Public URL the generated document is served from
    pub data_url: String,

    /// Locale code selecting translation files (e.g. "en")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    pub project: ProjectMetadata,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_url: "https://raw.githubusercontent.com/OPENER-next/OpenStop-taginfo/main/taginfo.json"
                .to_string(),
            language: Some("en".to_string()),
            project: ProjectMetadata {
                name: "OpenStop".to_string(),
                description:
                    "App for collecting OpenStreetMap-compliant accessibility data in public transport"
                        .to_string(),
                project_url: "https://openstop.app/".to_string(),
                doc_url: "https://github.com/OPENER-next/OpenStop".to_string(),
                icon_url:
                    "https://raw.githubusercontent.com/OPENER-next/OpenStop/master/web/favicon.png"
                        .to_string(),
                contact_name: "OPENER NEXT".to_string(),
                contact_email: "FIXME".to_string(),
            },
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TagInfoError::Config(format!("Config file not found: {}", path.display()))
            } else {
                TagInfoError::Io(e)
            }
        })?;

        toml::from_str(&contents).map_err(|e| {
            TagInfoError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Save config to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Locate and load the configuration.
    ///
    /// An explicit path wins, then `TAGINFO_CONFIG`, then `taginfo.toml` in
    /// `dir`. Without any of these the built-in defaults are used.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = Self::locate(explicit, dir) {
            log::debug!("Loading configuration from {}", path.display());
            return Self::load_from_file(&path);
        }

        log::debug!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    fn locate(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(dir.join(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(dir.join(path));
        }

        let default_path = dir.join(CONFIG_FILE_NAME);
        default_path.is_file().then_some(default_path)
    }
}
