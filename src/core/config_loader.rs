//! # Config Loader
//!
//! Reads a menu definition from disk. The file format is picked from the
//! extension: `.json` files go through `serde_json`, `.yaml` files through
//! `serde_yaml`. Both map onto the same [`MenuItem`] shape, with the children
//! array stored under the `item` key.
use crate::models::MenuItem;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read menu file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse JSON menu")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse YAML menu")]
    Yaml(#[from] serde_yaml::Error),
    #[error("wrong extension: {0}")]
    UnsupportedExtension(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFormat {
    Json,
    Yaml,
}

impl MenuFormat {
    /// Picks the format from the file extension. Only `.json` and `.yaml` are accepted.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ if extension.is_empty() => Err(ConfigError::UnsupportedExtension(String::new())),
            _ => Err(ConfigError::UnsupportedExtension(format!(".{}", extension))),
        }
    }
}

/// Parses the root record of a menu definition.
pub fn parse_menu(content: &str, format: MenuFormat) -> Result<MenuItem, ConfigError> {
    let root = match format {
        MenuFormat::Json => serde_json::from_str(content)?,
        MenuFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(root)
}

/// Reads and parses the menu file at `path`.
///
/// The extension is checked before touching the filesystem, so an unsupported
/// extension is reported as such even when the file does not exist.
pub fn load_menu_file(path: &Path) -> Result<MenuItem, ConfigError> {
    let format = MenuFormat::from_path(path)?;
    let clean_path = dunce::simplified(path);
    log::debug!("Loading {:?} menu from {}", format, clean_path.display());

    let content = fs::read_to_string(clean_path).map_err(|e| ConfigError::Io {
        path: clean_path.display().to_string(),
        source: e,
    })?;
    let root = parse_menu(&content, format)?;
    log::debug!(
        "Menu '{}' loaded with {} top-level entries.",
        root.name,
        root.children.len()
    );
    Ok(root)
}
