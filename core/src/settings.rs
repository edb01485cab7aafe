use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

use crate::*;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] GameError),
}

/// Tunables of a play session, usually read from a TOML file.
///
/// ```toml
/// loss_delay_ms = 3000
/// seed = 42
///
/// [game]
/// size = [15, 15]
/// cell_size = 32.0
/// offset = 10.0
/// bomb_probability = 0.2
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    /// Time between revealing a bomb and switching to the loser scene.
    pub loss_delay_ms: u64,
    /// Fixed seed for the session, random when absent.
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_toml_str(source: &str) -> core::result::Result<Self, SettingsError> {
        let settings: Self = toml::from_str(source)?;
        settings.game.validate()?;
        Ok(settings)
    }

    pub fn loss_delay(&self) -> Duration {
        Duration::from_millis(self.loss_delay_ms)
    }

    /// The configured seed, or `fallback` when none is set.
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            loss_delay_ms: 3000,
            seed: None,
        }
    }
}
