use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::ShelfConfig;

/// Error type for shelf discovery and config handling
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no shelf found here or in any parent directory (run `tsf init`)")]
    NotAShelf,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse shelf.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Walk up from `start` looking for a `shelf/` directory holding a
/// `shelf.toml`. Returns the containing root.
pub fn discover_shelf(start: &Path) -> Result<PathBuf, ConfigError> {
    let mut current = start.to_path_buf();
    loop {
        let shelf_dir = current.join("shelf");
        if shelf_dir.is_dir() && shelf_dir.join("shelf.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(ConfigError::NotAShelf);
        }
    }
}

/// Read the shelf config, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe editing.
pub fn read_config(shelf_dir: &Path) -> Result<(ShelfConfig, toml_edit::DocumentMut), ConfigError> {
    let config_path = shelf_dir.join("shelf.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: ShelfConfig = toml::from_str(&config_text)?;
    let doc: toml_edit::DocumentMut = config_text
        .parse()
        .map_err(|_: toml_edit::TomlError| {
            ConfigError::ParseError(toml::from_str::<ShelfConfig>("").unwrap_err())
        })?;
    Ok((config, doc))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(shelf_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let config_path = shelf_dir.join("shelf.toml");
    fs::write(&config_path, doc.to_string()).map_err(|e| ConfigError::ReadError {
        path: config_path,
        source: e,
    })?;
    Ok(())
}

/// Update the signed-in profile in the config document
pub fn set_profile(doc: &mut toml_edit::DocumentMut, user: &str) {
    if !doc.contains_key("profile") {
        doc["profile"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["profile"]["user"] = toml_edit::value(user);
}
