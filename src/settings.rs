//! Host settings
//!
//! Loaded from a JSON file on native builds; the browser build receives
//! them from the page. Missing fields fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ASPECT, DEFAULT_ZOOM};
use crate::input::OrientationConfig;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Viewport zoom (pixels per world unit)
    pub zoom: f32,
    /// World aspect ratio (width / height)
    pub aspect: f32,
    /// Underside hits hang on a viscous tether
    pub sticky_mode: bool,
    /// Fixed run seed (random when absent)
    pub seed: Option<u64>,
    /// Controller inbox capacity
    pub inbox_capacity: usize,

    // === Haptics (ms) ===
    pub vibrate_jump_ms: u32,
    pub vibrate_bounce_ms: u32,
    pub vibrate_game_over_ms: u32,

    /// Controller-side orientation mapping
    pub orientation: OrientationConfig,
    /// Where the high score table lives (native only)
    pub high_scores_path: Option<PathBuf>,

    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            aspect: DEFAULT_ASPECT,
            sticky_mode: true,
            seed: None,
            inbox_capacity: 64,

            vibrate_jump_ms: 30,
            vibrate_bounce_ms: 15,
            vibrate_game_over_ms: 400,

            orientation: OrientationConfig::default(),
            high_scores_path: None,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tuning = settings.tuning.sanitized();
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a file, falling back to defaults on any problem
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
