// src/core/settings.rs

use crate::{
    core::{color, paths},
    models::{MenuStyle, Settings, StyleConfig},
};
use anyhow::{Context, Result};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not read settings file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings file '{path}'")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize settings to TOML")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Loads the settings.
///
/// An explicit path must point to an existing file. Without one, the default
/// `settings.toml` is read; when it does not exist yet it is created with the
/// default values, and a failure to create it only costs a warning.
pub fn load_settings(explicit_path: Option<&Path>) -> Result<Settings, SettingsError> {
    if let Some(path) = explicit_path {
        return read_settings_file(path);
    }

    let settings_path = match paths::get_settings_path() {
        Ok(path) => path,
        Err(e) => {
            log::warn!("{:#}. Using default settings.", anyhow::Error::from(e));
            return Ok(Settings::default());
        }
    };

    if settings_path.exists() {
        return read_settings_file(&settings_path);
    }

    let defaults = Settings::default();
    let toml_string = toml::to_string_pretty(&defaults)?;
    match fs::write(&settings_path, toml_string) {
        Ok(()) => log::debug!(
            "Default settings written to {}",
            settings_path.display()
        ),
        Err(e) => log::warn!(
            "Could not write default settings to {}: {}",
            settings_path.display(),
            e
        ),
    }
    Ok(defaults)
}

/// Parses settings from a TOML string. Missing fields take their defaults.
pub fn parse_settings(content: &str, origin: &Path) -> Result<Settings, SettingsError> {
    toml::from_str(content).map_err(|e| SettingsError::TomlParse {
        path: origin.display().to_string(),
        source: e,
    })
}

fn read_settings_file(path: &Path) -> Result<Settings, SettingsError> {
    log::debug!("Loading settings from {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| SettingsError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_settings(&content, path)
}

/// Resolves the color names of a [`StyleConfig`] into a ready-to-use [`MenuStyle`].
pub fn resolve_style(config: &StyleConfig) -> Result<MenuStyle> {
    Ok(MenuStyle {
        item_prompt: config.item_prompt.clone(),
        submenu_prompt: config.submenu_prompt.clone(),
        item_color: color::parse_color_name(&config.item_color)
            .context("Invalid `style.item_color` in settings")?,
        submenu_color: color::parse_color_name(&config.submenu_color)
            .context("Invalid `style.submenu_color` in settings")?,
        suffix: config.suffix.clone(),
        submenu_marker: config.submenu_marker.clone(),
        indent: config.indent,
        back_exits_at_root: config.back_exits_at_root,
    })
}
