//! Application configuration shared by the CLI and the server
//!
//! Loaded from a JSON file; missing fields take their defaults.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::{Player, DEFAULT_SIZE, MAX_SIZE};

/// Game and service settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexConfig {
    /// Board side length
    pub size: usize,
    /// Side the human plays in interactive games
    pub human: Player,
    /// Seed for the computer opponent (None = entropy)
    pub seed: Option<u64>,
    /// HTTP port for `serve`
    pub port: u16,
}

impl Default for HexConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            human: Player::X,
            seed: None,
            port: 8002,
        }
    }
}

impl HexConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: HexConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.size == 0 || self.size > MAX_SIZE {
            anyhow::bail!("board size must be between 1 and {}, got {}", MAX_SIZE, self.size);
        }
        Ok(())
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
