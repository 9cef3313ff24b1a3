//! Settings persistence using toml_edit to preserve formatting and comments.

use super::PluginSettings;
use anyhow::{Context, Result};
use std::path::Path;
use toml_edit::DocumentMut;

/// Save plugin settings to a TOML file
pub fn save_settings(path: &Path, settings: &PluginSettings) -> Result<()> {
    // Convert settings to TOML string and parse as document
    let new_content =
        toml::to_string_pretty(settings).with_context(|| "Failed to serialize settings")?;
    let new_doc: DocumentMut = new_content
        .parse()
        .with_context(|| "Failed to parse serialized settings")?;

    std::fs::write(path, new_doc.to_string())
        .with_context(|| format!("Failed to write settings file: {:?}", path))?;

    Ok(())
}
