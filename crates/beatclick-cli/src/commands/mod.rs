//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod chart;
pub mod replay;
pub mod simulate;

use std::path::Path;

use anyhow::{Context, Result};
use beatclick_core::GameConfig;
use tracing::{debug, info};

/// Load the game config, falling back to defaults when the file is absent
pub fn load_config(path: &Path) -> Result<GameConfig> {
    if !path.exists() {
        debug!("No config at {:?}, using defaults", path);
        return Ok(GameConfig::default());
    }
    let config = GameConfig::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    info!("Loaded config from {:?}", path);
    Ok(config)
}
