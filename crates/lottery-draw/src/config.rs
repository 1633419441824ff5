//! Configuration management

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::draw::{DrawParams, FirstDraw, DEFAULT_MAX_REHASHES};
use crate::round::Round;

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV: &str = "LOTTERY_DRAW_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Draw configuration. Defaults reproduce round one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub seed: String,
    pub participants: u64,
    pub draws: usize,
    pub reserved: Vec<u64>,
    pub first_draw: FirstDraw,
    pub max_rehashes: u64,
    /// Expected winners; when set the run fails unless it reproduces them.
    #[serde(default)]
    pub published: Option<Vec<u64>>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        let round = Round::first();
        Self {
            seed: round.block_hash,
            participants: round.participants,
            draws: round.draws,
            reserved: round.reserved,
            first_draw: round.first_draw,
            max_rehashes: DEFAULT_MAX_REHASHES,
            published: Some(round.published),
        }
    }
}

impl DrawConfig {
    /// Load configuration from a TOML file (if `LOTTERY_DRAW_CONFIG` is set)
    /// and environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Fields missing from the file keep their defaults, except `published`,
    /// which is only checked when the file lists it.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `LOTTERY_DRAW_*` overrides read through `lookup`.
    ///
    /// Overriding any draw input drops `published`, which described the old
    /// inputs.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut changed = false;

        if let Some(seed) = lookup("LOTTERY_DRAW_SEED") {
            self.seed = seed;
            changed = true;
        }

        if let Some(n) = lookup("LOTTERY_DRAW_PARTICIPANTS") {
            self.participants = n
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("Invalid participants: {}", e)))?;
            changed = true;
        }

        if let Some(n) = lookup("LOTTERY_DRAW_DRAWS") {
            self.draws = n
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("Invalid draws: {}", e)))?;
            changed = true;
        }

        if let Some(policy) = lookup("LOTTERY_DRAW_FIRST_DRAW") {
            self.first_draw = match policy.as_str() {
                "unchecked" => FirstDraw::Unchecked,
                "checked" => FirstDraw::Checked,
                other => {
                    return Err(ConfigError::Invalid(format!(
                        "Invalid first_draw: {} (expected checked or unchecked)",
                        other
                    )))
                }
            };
            changed = true;
        }

        if changed && self.published.take().is_some() {
            debug!("draw inputs overridden, dropping published winners");
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if let Some(published) = &self.published {
            if published.len() != self.draws {
                return Err(ConfigError::Invalid(format!(
                    "published list has {} entries, expected {}",
                    published.len(),
                    self.draws
                )));
            }
        }

        Ok(())
    }

    pub fn params(&self) -> DrawParams {
        DrawParams::new(self.seed.as_str(), self.participants, self.draws)
            .with_reserved(self.reserved.iter().copied())
            .with_first_draw(self.first_draw)
            .with_max_rehashes(self.max_rehashes)
    }
}
