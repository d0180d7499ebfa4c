use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::{Difficulty, KeySymbol};
use crate::config::{judgement, playfield, timing};
use crate::error::{Error, Result};

/// Rectangle hit-objects are placed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayField {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            width: playfield::WIDTH,
            height: playfield::HEIGHT,
            margin: playfield::MARGIN,
        }
    }
}

impl PlayField {
    /// Inclusive placement bounds `((min_x, max_x), (min_y, max_y))` for objects
    /// of the given radius.
    pub fn placement_bounds(&self, radius: f64) -> Result<((f64, f64), (f64, f64))> {
        let inset = self.margin.max(radius);
        let (min_x, max_x) = (inset, self.width - inset);
        let (min_y, max_y) = (inset, self.height - inset);
        if !(min_x <= max_x && min_y <= max_y) {
            return Err(Error::InvalidPlayField(format!(
                "{}x{} cannot fit objects with inset {}",
                self.width, self.height, inset
            )));
        }
        Ok(((min_x, max_x), (min_y, max_y)))
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub hit_window: f64,
    pub decimation: u32,
    pub alphabet: Vec<KeySymbol>,
    pub playfield: PlayField,
    pub tick_rate_hz: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            hit_window: judgement::HIT_WINDOW_SECS,
            decimation: judgement::DECIMATION,
            alphabet: judgement::ALPHABET.iter().copied().map(KeySymbol::new).collect(),
            playfield: PlayField::default(),
            tick_rate_hz: timing::TICK_RATE_HZ,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config = Self::parse(&content)?;
        debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Parse config from TOML content. Missing keys take their defaults.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.hit_window.is_finite() && self.hit_window > 0.0) {
            return Err(Error::ConfigParseError(format!(
                "hit_window must be positive, got {}",
                self.hit_window
            )));
        }
        if self.decimation == 0 {
            return Err(Error::InvalidDecimation(self.decimation));
        }
        if self.tick_rate_hz == 0 {
            return Err(Error::ConfigParseError(
                "tick_rate_hz must be positive".to_string(),
            ));
        }
        self.playfield.placement_bounds(self.radius())?;
        Ok(())
    }

    pub fn radius(&self) -> f64 {
        self.difficulty.radius()
    }

    pub fn is_pointer_only(&self) -> bool {
        self.alphabet.is_empty()
    }
}
