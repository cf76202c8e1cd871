//! Configuration constants and runtime settings
//!
//! Compile-time tuning lives in the constant modules below. Settings a user
//! may want to change without rebuilding are read from a JSON file at startup
//! (see [`ShowcaseSettings::load`]).

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bevy::scenes::ShowcaseScene;

/// Width of the offscreen render target in pixels
pub const RENDER_WIDTH: u32 = 800;

/// Height of the offscreen render target in pixels
pub const RENDER_HEIGHT: u32 = 600;

/// Environment variable naming an explicit settings file
pub const SETTINGS_ENV_VAR: &str = "SHOWCASE_CONFIG";

/// Settings file looked up in the working directory when the variable is unset
pub const DEFAULT_SETTINGS_FILE: &str = "showcase.json";

/// Orbit camera settings
pub mod camera {
    /// Rotation speed multiplier for pointer drag
    pub const ROTATION_SPEED: f32 = 0.005;

    /// Zoom speed multiplier for scroll wheel
    pub const ZOOM_SPEED: f32 = 0.5;

    /// Minimum camera distance from center point
    pub const MIN_DISTANCE: f32 = 2.0;

    /// Maximum camera distance from center point
    pub const MAX_DISTANCE: f32 = 20.0;

    /// Lowest pitch: the camera stays level with the orbit center, never below
    pub const MIN_PITCH: f32 = 0.0;

    /// Highest pitch, just short of straight down to keep `looking_at` stable
    pub const MAX_PITCH: f32 = 1.5;
}

/// Hover picking settings
pub mod picking {
    /// Bounding radius used for the car model, whose extent is unknown until loaded
    pub const CAR_PICK_RADIUS: f32 = 1.6;
}

/// Performance monitoring settings
pub mod performance {
    /// Interval for logging performance stats (seconds)
    pub const STATS_PRINT_INTERVAL: f64 = 2.0;

    /// Number of frame timing samples to keep for averaging
    pub const FRAME_TIMING_SAMPLES: usize = 60;
}

/// Image compression settings
pub mod compression {
    /// Default JPEG quality level (1-100)
    pub const JPEG_QUALITY: u8 = 85;
}

/// Errors raised while loading [`ShowcaseSettings`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Runtime settings, every field optional in the JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseSettings {
    /// Scene shown at startup
    pub initial_scene: ShowcaseScene,
    /// Target frames per second for the render loop and frame output
    pub target_fps: f64,
    /// Frames skipped after startup and after each scene switch
    pub pre_roll_frames: u32,
    /// JPEG quality for the `frame://` protocol (1-100)
    pub jpeg_quality: u8,
    /// Car model path relative to the Bevy asset directory
    pub car_model_path: String,
}

impl Default for ShowcaseSettings {
    fn default() -> Self {
        Self {
            initial_scene: ShowcaseScene::default(),
            target_fps: 60.0,
            pre_roll_frames: 30,
            jpeg_quality: compression::JPEG_QUALITY,
            car_model_path: "models/lamborghini.glb".to_string(),
        }
    }
}

impl ShowcaseSettings {
    /// Resolve the settings file location and load it.
    ///
    /// Returns defaults when no file is configured or present.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var_os(SETTINGS_ENV_VAR) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = Path::new(DEFAULT_SETTINGS_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load settings with [`ShowcaseSettings::load`], falling back to defaults on error.
    ///
    /// The error is handed back so it can be reported once logging is up.
    pub fn load_or_default() -> (Self, Option<ConfigError>) {
        match Self::load() {
            Ok(settings) => (settings, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.target_fps.is_finite() && self.target_fps > 0.0) {
            return Err(ConfigError::Invalid {
                field: "target_fps",
                reason: format!("must be a positive number, got {}", self.target_fps),
            });
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Invalid {
                field: "jpeg_quality",
                reason: format!("must be within 1..=100, got {}", self.jpeg_quality),
            });
        }
        if self.car_model_path.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "car_model_path",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
