//! Obstacle spawning and recycling
//!
//! Obstacles are appended with increasing x and all scroll at the same speed,
//! so the list stays ordered by x (oldest and leftmost first) without sorting.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, ObstacleShape};
use crate::settings::ConfigurationError;

/// Inclusive range the top of a gap is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapRange {
    min: f64,
    max: f64,
}

impl GapRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigurationError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ConfigurationError::EmptyGapRange { min, max });
        }
        // Uniform sampling needs the width itself to be finite
        if !(max - min).is_finite() {
            return Err(ConfigurationError::GapRangeTooWide { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Uniform draw from `[min, max]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.min == self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }
}

/// The live set of obstacles
#[derive(Debug, Clone)]
pub struct ObstacleStream {
    obstacles: Vec<Obstacle>,
    shape: ObstacleShape,
    gap_range: GapRange,
}

impl ObstacleStream {
    pub fn new(shape: ObstacleShape, gap_range: GapRange) -> Self {
        Self {
            obstacles: Vec::with_capacity(4),
            shape,
            gap_range,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub(crate) fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    /// Newest obstacle (largest x)
    pub fn rightmost(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }

    /// Drop everything and start over with a single obstacle at `x`
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, x: f64) {
        self.obstacles.clear();
        self.spawn_at(rng, x);
    }

    /// Append an obstacle with a freshly drawn gap
    pub fn spawn_at<R: Rng + ?Sized>(&mut self, rng: &mut R, x: f64) {
        let gap_top = self.gap_range.sample(rng);
        log::trace!("Spawning obstacle at x={x:.1}, gap top {gap_top:.1}");
        self.obstacles.push(Obstacle::new(x, gap_top, self.shape));
    }

    /// Append at most one obstacle, `spawn_interval` behind the newest one,
    /// once the newest has scrolled far enough left. Returns true if one spawned.
    pub fn spawn_if_needed<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        screen_width: f64,
        spawn_interval: f64,
    ) -> bool {
        let next_x = match self.rightmost() {
            Some(last) if last.x < screen_width - spawn_interval => last.x + spawn_interval,
            Some(_) => return false,
            None => screen_width + spawn_interval,
        };
        self.spawn_at(rng, next_x);
        true
    }

    /// Scroll every obstacle left
    pub fn advance_all(&mut self, scroll_speed: f64) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(scroll_speed);
        }
    }

    /// Remove obstacles past the left threshold, returning how many went
    pub fn prune(&mut self, threshold: f64) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_off_screen(threshold));
        let removed = before - self.obstacles.len();
        if removed > 0 {
            log::trace!("Pruned {removed} obstacle(s)");
        }
        removed
    }
}
