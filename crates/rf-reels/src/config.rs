//! Board constants and host configuration
//!
//! Game rules (bet, board shape, paylines, symbol set) are fixed. Hosts may
//! configure the seed, starting balance, timing and on-screen layout.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{SlotError, SlotResult};
use crate::render::Bounds;
use crate::timing::{TimingConfig, TimingProfile};

/// Credits debited per spin
pub const BET: u64 = 10;
/// Reels (columns) on the board
pub const REEL_COUNT: usize = 5;
/// Visible rows per reel
pub const ROW_COUNT: usize = 3;
/// Fixed payline count
pub const PAYLINE_COUNT: usize = 20;
/// Starting balance when the host does not set one
pub const DEFAULT_BALANCE: u64 = 1000;

/// Config loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config: {0}")]
    Invalid(#[from] SlotError),
}

/// Where one reel sits on stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReelGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// On-screen placement of the reel block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelLayout {
    pub stage_width: f64,
    pub stage_height: f64,
    pub reel_width: f64,
    pub reel_height: f64,
    pub reel_margin: f64,
}

impl Default for ReelLayout {
    fn default() -> Self {
        Self {
            stage_width: 1280.0,
            stage_height: 720.0,
            reel_width: 200.0,
            reel_height: 600.0,
            reel_margin: 20.0,
        }
    }
}

impl ReelLayout {
    /// Width of all reels plus the gaps between them
    pub fn total_width(&self) -> f64 {
        REEL_COUNT as f64 * self.reel_width + (REEL_COUNT as f64 - 1.0) * self.reel_margin
    }

    /// Top-left of the reel block, centered on stage
    pub fn origin(&self) -> (f64, f64) {
        (
            (self.stage_width - self.total_width()) / 2.0,
            (self.stage_height - self.reel_height) / 2.0,
        )
    }

    pub fn reel_geometry(&self, reel: usize) -> ReelGeometry {
        let (x, y) = self.origin();
        ReelGeometry {
            x: x + reel as f64 * (self.reel_width + self.reel_margin),
            y,
            width: self.reel_width,
            height: self.reel_height,
        }
    }

    /// Visible window over all reels
    pub fn mask_bounds(&self) -> Bounds {
        let (x, y) = self.origin();
        Bounds {
            x,
            y,
            width: self.total_width(),
            height: self.reel_height,
        }
    }
}

/// Host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Outcome seed; derived from the wall clock when absent
    #[serde(default)]
    pub seed: Option<u32>,

    #[serde(default = "default_balance")]
    pub initial_balance: u64,

    #[serde(default)]
    pub timing_profile: TimingProfile,

    /// Explicit timing, overrides `timing_profile`
    #[serde(default)]
    pub timing: Option<TimingConfig>,

    #[serde(default)]
    pub layout: ReelLayout,
}

fn default_balance() -> u64 {
    DEFAULT_BALANCE
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            seed: None,
            initial_balance: DEFAULT_BALANCE,
            timing_profile: TimingProfile::Normal,
            timing: None,
            layout: ReelLayout::default(),
        }
    }
}

impl SlotConfig {
    /// Default config with a fixed seed
    pub fn seeded(seed: u32) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_balance(mut self, balance: u64) -> Self {
        self.initial_balance = balance;
        self
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Seed in effect: the configured one, or the low bits of the wall clock
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u32)
                .unwrap_or_default()
        })
    }

    /// Timing in effect
    pub fn timing_config(&self) -> TimingConfig {
        self.timing
            .clone()
            .unwrap_or_else(|| TimingConfig::from_profile(self.timing_profile))
    }

    pub fn validate(&self) -> SlotResult<()> {
        self.timing_config().validate(REEL_COUNT)?;
        let layout = &self.layout;
        if !(layout.reel_height > 0.0 && layout.reel_width > 0.0) {
            return Err(SlotError::InvalidLayout(format!(
                "reel size must be positive, got {}x{}",
                layout.reel_width, layout.reel_height
            )));
        }
        Ok(())
    }

    /// Import config from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Import config from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load by file extension (`.json`, `.yaml`, `.yml`)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            Some("yaml") | Some("yml") => Self::from_yaml(&text),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Export config as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
