pub mod persist;
mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load plugin settings from a TOML file
pub fn load_settings(path: &Path) -> Result<PluginSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {:?}", path))?;

    let settings: PluginSettings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse settings file: {:?}", path))?;

    Ok(settings)
}

/// Load settings from default locations or return default settings
pub fn load_settings_or_default(custom_path: Option<&Path>) -> Result<PluginSettings> {
    if let Some(path) = custom_path {
        return load_settings(path);
    }

    // Try default locations
    let default_paths = [
        "./tmdb-scraper.toml",
        "./config.toml",
        "~/.config/tmdb-scraper/config.toml",
        "/etc/tmdb-scraper/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_settings(path);
        }
    }

    // Return default settings if no file found
    Ok(PluginSettings::default())
}
