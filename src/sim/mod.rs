//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (every constant is per tick)
//! - Injected RNG only
//! - Stable obstacle order (spawn order = x order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod stream;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{check, first_collision, obstacle_hit};
pub use rect::Rect;
pub use snapshot::{AvatarView, ObstacleView, Snapshot};
pub use state::{Avatar, EndReason, GamePhase, GameState, Obstacle, ObstacleBody, ObstacleShape};
pub use stream::{GapRange, ObstacleStream};
pub use tick::{TickInput, tick};
