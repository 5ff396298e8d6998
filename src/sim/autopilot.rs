//! Scripted player for demo mode
//!
//! Reads only the render snapshot, like a human would, and presses the
//! trigger whenever the avatar is about to sink below the next gap.

use serde::{Deserialize, Serialize};

use super::snapshot::{ObstacleView, Snapshot};
use super::state::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Autopilot {
    /// Keep the hitbox bottom at least this far above the gap bottom
    pub clearance: f64,
    /// Start a new run when idle or after a crash
    pub restart: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            clearance: 20.0,
            restart: true,
        }
    }
}

impl Autopilot {
    /// Whether to press the trigger this tick
    pub fn decide(&self, snapshot: &Snapshot) -> bool {
        match snapshot.phase {
            GamePhase::Idle | GamePhase::Ended => self.restart,
            GamePhase::Running => {
                let avatar = &snapshot.avatar;
                let floor = match Self::target(snapshot) {
                    Some(obstacle) => obstacle.gap_bottom - self.clearance,
                    None => snapshot.screen_size.y * 0.5,
                };
                avatar.hitbox.max.y + avatar.velocity_y > floor
            }
        }
    }

    /// The first obstacle whose right edge is not yet behind the avatar
    fn target(snapshot: &Snapshot) -> Option<&ObstacleView> {
        let front = snapshot.avatar.hitbox.min.x;
        snapshot.obstacles.iter().find(|o| o.x + o.width >= front)
    }
}
