//! Gap Runner - a side-scrolling arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, obstacles, collisions, session state)
//! - `platform`: Fixed-step clock and input latching for the host render loop
//! - `settings`: Validated, data-driven game tuning

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{ConfigurationError, GameConfig};

/// Classic tuning, tuned for a 60 Hz tick.
///
/// Every kinematic value is expressed per tick, never per second.
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 60;
    /// Maximum ticks run for a single rendered frame
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f64 = 400.0;
    pub const SCREEN_HEIGHT: f64 = 600.0;

    /// Obstacle body dimensions (each of the two bodies)
    pub const OBSTACLE_WIDTH: f64 = 100.0;
    pub const OBSTACLE_HEIGHT: f64 = 400.0;
    /// Vertical opening between the upper and lower bodies
    pub const GAP_HEIGHT: f64 = 200.0;
    /// Range the top edge of the gap is drawn from
    pub const GAP_TOP_MIN: f64 = 100.0;
    pub const GAP_TOP_MAX: f64 = 400.0;
    /// Horizontal distance between consecutive obstacles
    pub const SPAWN_INTERVAL: f64 = 250.0;
    /// Obstacles left of this x are dropped
    pub const OFFSCREEN_THRESHOLD: f64 = -200.0;
    /// Leftward scroll per tick
    pub const SCROLL_SPEED: f64 = 5.0;

    /// Avatar sprite size and spawn point
    pub const AVATAR_WIDTH: f64 = 60.0;
    pub const AVATAR_HEIGHT: f64 = 40.0;
    pub const AVATAR_X: f64 = 50.0;
    pub const AVATAR_START_Y: f64 = SCREEN_HEIGHT / 2.0;

    /// Downward acceleration (px/tick²)
    pub const GRAVITY: f64 = 0.9;
    /// Upward speed set by a trigger (px/tick)
    pub const IMPULSE: f64 = 12.0;

    /// Hitbox insets from the sprite bounds
    pub const AVATAR_HITBOX_MARGIN: f64 = 5.0;
    pub const OBSTACLE_HITBOX_MARGIN: f64 = 3.0;

    /// Cosmetic tilt (degrees)
    pub const TILT_STEP: f64 = 3.0;
    pub const TILT_MAX: f64 = 25.0;
}
