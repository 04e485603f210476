//! Runtime settings
//!
//! Read from an optional JSON file. Missing keys take their defaults, and an
//! unreadable or malformed file falls back to defaults entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, TICK_RATE};

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play field size in pixels
    pub field_width: f32,
    pub field_height: f32,
    /// Target ticks per second
    pub tick_rate: u32,
    /// RNG seed for the round
    pub seed: u64,
    /// Stop after this many ticks (0 = no cap)
    pub max_ticks: u64,
    /// Sleep between ticks to hold `tick_rate`
    pub realtime: bool,
    /// Let the demo pilot play
    pub demo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            tick_rate: TICK_RATE,
            seed: 0x5EED,
            // Five minutes at the default rate
            max_ticks: 15_000,
            realtime: false,
            demo: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from `path`, or defaults if it cannot be read
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Tick cap, if any
    pub fn tick_limit(&self) -> Option<u64> {
        (self.max_ticks > 0).then_some(self.max_ticks)
    }
}
