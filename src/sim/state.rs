//! Game state and core simulation types
//!
//! The session exclusively owns the avatar, the obstacle stream and its RNG.
//! Renderers only ever see a [`Snapshot`] copy.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::snapshot::Snapshot;
use super::stream::ObstacleStream;
use crate::settings::{ConfigurationError, GameConfig};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first trigger
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; frozen until the next trigger
    Ended,
}

/// Which body of an obstacle was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleBody {
    /// Body above the gap
    Upper,
    /// Body below the gap
    Lower,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Sprite bottom went past the screen bottom
    HitGround,
    /// Sprite top went above the screen top
    HitCeiling,
    /// Hitbox overlapped an obstacle
    Collision(ObstacleBody),
}

/// The player's avatar
///
/// Only `y` moves; `x` is fixed when the avatar is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left of the sprite
    pos: DVec2,
    /// Vertical speed in px/tick (positive = downward)
    pub velocity_y: f64,
    /// Cosmetic rotation in degrees (positive = nose up)
    pub tilt: f64,
    size: DVec2,
    hitbox_margin: f64,
    tilt_step: f64,
    tilt_max: f64,
}

impl Avatar {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: DVec2::new(config.avatar_x, config.avatar_start_y),
            velocity_y: 0.0,
            tilt: 0.0,
            size: DVec2::new(config.avatar_width, config.avatar_height),
            hitbox_margin: config.avatar_hitbox_margin,
            tilt_step: config.tilt_step,
            tilt_max: config.tilt_max,
        }
    }

    #[inline]
    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        self.size
    }

    /// Move vertically without changing velocity (tests and scripted setups)
    pub fn set_y(&mut self, y: f64) {
        self.pos.y = y;
    }

    /// Add one tick of gravity, then move
    pub fn apply_gravity_and_integrate(&mut self, gravity: f64) {
        self.velocity_y += gravity;
        self.integrate();
    }

    /// Set an upward velocity, replacing whatever the avatar had
    pub fn trigger_impulse(&mut self, impulse: f64) {
        self.velocity_y = -impulse;
    }

    /// Move by the current velocity and ease the tilt toward the direction of travel
    pub fn integrate(&mut self) {
        self.pos.y += self.velocity_y;
        self.update_tilt();
    }

    fn update_tilt(&mut self) {
        if self.velocity_y < 0.0 {
            self.tilt = (self.tilt + self.tilt_step).min(self.tilt_max);
        } else {
            self.tilt = (self.tilt - self.tilt_step).max(-self.tilt_max);
        }
    }

    /// Full sprite bounds
    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Collision rectangle (sprite bounds inset on every side)
    pub fn hitbox(&self) -> Rect {
        self.bounds().inset(self.hitbox_margin)
    }

    /// Boundary check against the playfield, ground first
    pub fn out_of_bounds(&self, screen_height: f64) -> Option<EndReason> {
        if self.pos.y + self.size.y > screen_height {
            Some(EndReason::HitGround)
        } else if self.pos.y < 0.0 {
            Some(EndReason::HitCeiling)
        } else {
            None
        }
    }

    pub fn is_out_of_bounds(&self, screen_height: f64) -> bool {
        self.out_of_bounds(screen_height).is_some()
    }
}

/// Shape shared by every obstacle of a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleShape {
    /// Width of both bodies
    pub width: f64,
    /// Height of each body
    pub height: f64,
    /// Opening between the two bodies
    pub gap_height: f64,
    pub hitbox_margin: f64,
}

impl ObstacleShape {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            width: config.obstacle_width,
            height: config.obstacle_height,
            gap_height: config.gap_height,
            hitbox_margin: config.obstacle_hitbox_margin,
        }
    }
}

/// A pair of bodies with a vertical gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f64,
    /// Top of the gap (bottom of the upper body); fixed at creation
    gap_top: f64,
    /// Whether the avatar has been credited for this obstacle
    passed: bool,
    shape: ObstacleShape,
}

impl Obstacle {
    pub fn new(x: f64, gap_top: f64, shape: ObstacleShape) -> Self {
        Self {
            x,
            gap_top,
            passed: false,
            shape,
        }
    }

    #[inline]
    pub fn gap_top(&self) -> f64 {
        self.gap_top
    }

    /// Top of the lower body
    #[inline]
    pub fn gap_bottom(&self) -> f64 {
        self.gap_top + self.shape.gap_height
    }

    #[inline]
    pub fn passed(&self) -> bool {
        self.passed
    }

    #[inline]
    pub fn shape(&self) -> &ObstacleShape {
        &self.shape
    }

    /// Scroll left
    pub fn advance(&mut self, scroll_speed: f64) {
        self.x -= scroll_speed;
    }

    pub fn is_off_screen(&self, threshold: f64) -> bool {
        self.x < threshold
    }

    /// Credit the obstacle once its left edge is behind the avatar.
    /// Returns true only on the tick it becomes passed.
    pub fn mark_passed_if_crossed(&mut self, avatar_x: f64) -> bool {
        if !self.passed && self.x < avatar_x {
            self.passed = true;
            return true;
        }
        false
    }

    /// Sprite bounds of the upper body (ends at the gap top)
    pub fn upper_body(&self) -> Rect {
        Rect::from_xywh(
            self.x,
            self.gap_top - self.shape.height,
            self.shape.width,
            self.shape.height,
        )
    }

    /// Sprite bounds of the lower body (starts at the gap bottom)
    pub fn lower_body(&self) -> Rect {
        Rect::from_xywh(
            self.x,
            self.gap_bottom(),
            self.shape.width,
            self.shape.height,
        )
    }

    pub fn upper_hitbox(&self) -> Rect {
        self.upper_body().inset(self.shape.hitbox_margin)
    }

    pub fn lower_hitbox(&self) -> Rect {
        self.lower_body().inset(self.shape.hitbox_margin)
    }
}

/// Complete session state
///
/// Generic over the RNG so tests can inject any generator; the default is a
/// seeded PCG so runs replay exactly.
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub(crate) config: GameConfig,
    pub(crate) rng: R,
    pub(crate) phase: GamePhase,
    pub(crate) score: u64,
    /// Best score seen by this process; never persisted
    pub(crate) best_score: u64,
    /// Runs started since construction
    pub(crate) runs: u64,
    /// Ticks simulated in the current run
    pub(crate) time_ticks: u64,
    pub(crate) end_reason: Option<EndReason>,
    pub(crate) avatar: Avatar,
    pub(crate) stream: ObstacleStream,
}

impl GameState<Pcg32> {
    /// Create an idle session with a PCG generator seeded from `seed`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigurationError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create an idle session that draws gap positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let stream = ObstacleStream::new(ObstacleShape::from_config(&config), config.gap_range()?);
        Ok(Self {
            avatar: Avatar::new(&config),
            config,
            rng,
            phase: GamePhase::Idle,
            score: 0,
            best_score: 0,
            runs: 0,
            time_ticks: 0,
            end_reason: None,
            stream,
        })
    }

    /// Reset everything for a new run and apply the opening impulse
    pub fn start_run(&mut self) {
        self.avatar = Avatar::new(&self.config);
        let first_x = self.config.screen_width + self.config.spawn_interval;
        self.stream.reset(&mut self.rng, first_x);
        self.score = 0;
        self.time_ticks = 0;
        self.end_reason = None;
        self.runs += 1;
        self.phase = GamePhase::Running;
        self.avatar.trigger_impulse(self.config.impulse);
        log::info!("Run {} started", self.runs);
    }

    /// Freeze the run
    pub(crate) fn end_run(&mut self, reason: EndReason) {
        self.phase = GamePhase::Ended;
        self.end_reason = Some(reason);
        log::info!(
            "Run {} ended after {} ticks: {:?}, score {}",
            self.runs,
            self.time_ticks,
            reason,
            self.score
        );
        if self.score > self.best_score {
            self.best_score = self.score;
            log::info!("New best score: {}", self.best_score);
        }
    }
}

impl<R> GameState<R> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    /// Live obstacles, oldest (leftmost) first
    pub fn obstacles(&self) -> &[Obstacle] {
        self.stream.obstacles()
    }

    /// Read-only copy for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
