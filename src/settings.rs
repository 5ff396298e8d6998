//! Game tuning and configuration
//!
//! All values are fixed for the lifetime of a session. Kinematic values are
//! per tick: a host running at a different frame rate must still advance the
//! simulation in whole ticks (see `platform::FixedStepper`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::GapRange;

/// Rejected configuration values
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("gap height must not be negative (got {0})")]
    NegativeGapHeight(f64),
    #[error("spawn interval must be positive (got {0})")]
    NonPositiveSpawnInterval(f64),
    #[error("gap top range is empty: min {min} > max {max}")]
    EmptyGapRange { min: f64, max: f64 },
    #[error("gap top range {min}..={max} is too wide to sample")]
    GapRangeTooWide { min: f64, max: f64 },
    #[error("scroll speed {scroll_speed} must be below the spawn interval {spawn_interval}")]
    ScrollOutpacesSpawn { scroll_speed: f64, spawn_interval: f64 },
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Game tuning, one struct so alternate tunings can be tried without code changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub screen_width: f64,
    pub screen_height: f64,

    // === Obstacles ===
    pub obstacle_width: f64,
    pub obstacle_height: f64,
    pub gap_height: f64,
    /// Lowest y the top of a gap may be drawn at
    pub gap_top_min: f64,
    /// Highest y the top of a gap may be drawn at
    pub gap_top_max: f64,
    /// Leftward movement per tick
    pub scroll_speed: f64,
    /// Horizontal distance between consecutive obstacles
    pub spawn_interval: f64,
    /// Obstacles with x below this are removed (negative: fully off the left edge)
    pub offscreen_threshold: f64,

    // === Avatar ===
    pub avatar_width: f64,
    pub avatar_height: f64,
    pub avatar_x: f64,
    pub avatar_start_y: f64,
    /// Downward acceleration per tick
    pub gravity: f64,
    /// Upward speed a trigger sets
    pub impulse: f64,

    // === Hitboxes ===
    pub avatar_hitbox_margin: f64,
    pub obstacle_hitbox_margin: f64,

    // === Cosmetics ===
    pub tilt_step: f64,
    pub tilt_max: f64,

    // === Timing ===
    /// Ticks per second the constants above are tuned for
    pub tick_rate: u32,
    /// Cap on ticks run for one rendered frame
    pub max_substeps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            gap_height: GAP_HEIGHT,
            gap_top_min: GAP_TOP_MIN,
            gap_top_max: GAP_TOP_MAX,
            scroll_speed: SCROLL_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            offscreen_threshold: OFFSCREEN_THRESHOLD,

            avatar_width: AVATAR_WIDTH,
            avatar_height: AVATAR_HEIGHT,
            avatar_x: AVATAR_X,
            avatar_start_y: AVATAR_START_Y,
            gravity: GRAVITY,
            impulse: IMPULSE,

            avatar_hitbox_margin: AVATAR_HITBOX_MARGIN,
            obstacle_hitbox_margin: OBSTACLE_HITBOX_MARGIN,

            tilt_step: TILT_STEP,
            tilt_max: TILT_MAX,

            tick_rate: TICK_RATE,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl GameConfig {
    /// Check every value, failing on the first one that makes the game unplayable
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let floats = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("gap_height", self.gap_height),
            ("gap_top_min", self.gap_top_min),
            ("gap_top_max", self.gap_top_max),
            ("scroll_speed", self.scroll_speed),
            ("spawn_interval", self.spawn_interval),
            ("offscreen_threshold", self.offscreen_threshold),
            ("avatar_width", self.avatar_width),
            ("avatar_height", self.avatar_height),
            ("avatar_x", self.avatar_x),
            ("avatar_start_y", self.avatar_start_y),
            ("gravity", self.gravity),
            ("impulse", self.impulse),
            ("avatar_hitbox_margin", self.avatar_hitbox_margin),
            ("obstacle_hitbox_margin", self.obstacle_hitbox_margin),
            ("tilt_step", self.tilt_step),
            ("tilt_max", self.tilt_max),
        ];
        if let Some(&(field, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigurationError::NonFinite { field });
        }

        if self.gap_height < 0.0 {
            return Err(ConfigurationError::NegativeGapHeight(self.gap_height));
        }
        if self.spawn_interval <= 0.0 {
            return Err(ConfigurationError::NonPositiveSpawnInterval(
                self.spawn_interval,
            ));
        }

        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("avatar_width", self.avatar_width),
            ("avatar_height", self.avatar_height),
            ("scroll_speed", self.scroll_speed),
            ("tick_rate", f64::from(self.tick_rate)),
            ("max_substeps", f64::from(self.max_substeps)),
        ];
        if let Some(&(field, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigurationError::NonPositive { field, value });
        }

        let non_negative = [
            ("avatar_hitbox_margin", self.avatar_hitbox_margin),
            ("obstacle_hitbox_margin", self.obstacle_hitbox_margin),
            ("tilt_step", self.tilt_step),
            ("tilt_max", self.tilt_max),
        ];
        if let Some(&(field, value)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(ConfigurationError::Negative { field, value });
        }

        // One spawn per tick only keeps up if a tick never scrolls past a whole interval
        if self.scroll_speed >= self.spawn_interval {
            return Err(ConfigurationError::ScrollOutpacesSpawn {
                scroll_speed: self.scroll_speed,
                spawn_interval: self.spawn_interval,
            });
        }

        self.gap_range().map(|_| ())
    }

    /// Range obstacle gaps are drawn from
    pub fn gap_range(&self) -> Result<GapRange, ConfigurationError> {
        GapRange::new(self.gap_top_min, self.gap_top_max)
    }

    /// Wall-clock duration of one tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate.max(1)))
    }

    /// Parse a (possibly partial) JSON config; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
