//! Fixed-step clock
//!
//! Converts variable wall-clock frame times into whole simulation ticks
//! (accumulator pattern). The simulation itself never sees real time.

use std::time::Duration;

use crate::settings::GameConfig;

/// Longest frame the accumulator will take in; longer stalls (debugger,
/// suspended window) are treated as this long
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct FixedStepper {
    tick_secs: f64,
    accumulator: f64,
    max_substeps: u32,
}

impl FixedStepper {
    pub fn new(tick_rate: u32, max_substeps: u32) -> Self {
        Self {
            tick_secs: 1.0 / f64::from(tick_rate.max(1)),
            accumulator: 0.0,
            max_substeps: max_substeps.max(1),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.tick_rate, config.max_substeps)
    }

    /// Add one frame's worth of time and return how many ticks to run
    pub fn advance(&mut self, frame_dt: Duration) -> u32 {
        self.accumulator += frame_dt.min(MAX_FRAME_DELTA).as_secs_f64();

        let mut ticks = 0;
        while self.accumulator >= self.tick_secs && ticks < self.max_substeps {
            self.accumulator -= self.tick_secs;
            ticks += 1;
        }

        // Prevent spiral of death: drop whole ticks we could not run
        if self.accumulator >= self.tick_secs {
            log::debug!(
                "Dropping {:.1} ms of simulation backlog",
                (self.accumulator - self.accumulator % self.tick_secs) * 1000.0
            );
            self.accumulator %= self.tick_secs;
        }

        ticks
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.tick_secs
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
