//! Platform glue for the host render/input loop
//!
//! Handles the parts of a frame that are not simulation:
//! - Time/ticks (fixed-step accumulator)
//! - Input events (edge-triggered latch)

pub mod clock;
pub mod input;

use std::time::Duration;

pub use clock::FixedStepper;
pub use input::TriggerLatch;

use crate::settings::GameConfig;
use crate::sim::TickInput;

/// Turns wall-clock frames and raw button events into [`TickInput`]s
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub stepper: FixedStepper,
    pub trigger: TriggerLatch,
}

impl FrameInput {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            stepper: FixedStepper::from_config(config),
            trigger: TriggerLatch::new(),
        }
    }

    /// Input for this frame. A press stays pending until a frame actually runs a tick.
    pub fn frame(&mut self, frame_dt: Duration) -> TickInput {
        let elapsed_ticks = self.stepper.advance(frame_dt);
        let trigger = elapsed_ticks > 0 && self.trigger.take();
        TickInput {
            trigger,
            elapsed_ticks,
        }
    }
}
