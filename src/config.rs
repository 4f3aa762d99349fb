//! TOML-backed configuration loading for `EngineOptions`, in the style of
//! the teacher's `src/config/loader.rs`.

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::engine::EngineOptions;

/// Top-level shape of `claimaudit.toml`: a single `[modules]` table
/// mirroring `EngineOptions` field-for-field.
#[derive(Debug, serde::Deserialize)]
struct ConfigFile {
    #[serde(default)]
    modules: EngineOptions,
}

/// Loads `EngineOptions` from a TOML file. Returns the default options if
/// `path` does not exist; propagates parse errors for a file that does.
pub fn load(path: &Path) -> Result<EngineOptions> {
    if !path.exists() {
        return Ok(EngineOptions::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(config.modules)
}
