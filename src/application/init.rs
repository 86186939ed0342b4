//! Initialize configuration use case

use crate::error::{Result, TagInfoError};
use crate::infrastructure::config::CONFIG_FILE_NAME;
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a default configuration file into `dir`.
///
/// Returns the path of the written file. An existing file is never overwritten.
pub fn init(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(TagInfoError::Config(format!(
            "Configuration already exists: {}",
            path.display()
        )));
    }

    Config::default().save_to_file(&path)?;
    log::info!("Wrote default configuration to {}", path.display());

    Ok(path)
}
