use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::preview::DEFAULT_PREVIEW_ROWS;

/// Settings for rendering and writing preview pages, usually read from a
/// `preview.toml`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Maximum number of rows in the data preview.
    pub preview_rows: usize,
    /// Fail instead of rendering an empty pin name.
    pub strict: bool,
    /// Directory holding the paged table and highlight.js bundles, copied next
    /// to every written page.
    pub assets_dir: Option<PathBuf>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            strict: false,
            assets_dir: None,
        }
    }
}

impl PreviewConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let config_toml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read preview config {:?}", path))?;
        Self::from_toml(&config_toml)
            .with_context(|| format!("failed to deserialize preview config at {:?}", path))
    }

    pub fn from_toml(config_toml: &str) -> Result<Self> {
        Ok(toml::from_str(config_toml)?)
    }
}
