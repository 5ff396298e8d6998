//! Read-only render snapshot
//!
//! An owned copy of everything a renderer draws. Nothing in here points back
//! into the session, so the renderer can never mutate simulation state.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{EndReason, GamePhase, GameState, Obstacle};

/// Avatar pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarView {
    /// Top-left of the sprite
    pub pos: DVec2,
    pub size: DVec2,
    pub velocity_y: f64,
    /// Degrees, positive = nose up
    pub tilt: f64,
    pub hitbox: Rect,
}

/// One obstacle as drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f64,
    pub width: f64,
    pub gap_top: f64,
    pub gap_bottom: f64,
    pub passed: bool,
    /// Sprite bounds of the two bodies
    pub upper: Rect,
    pub lower: Rect,
}

impl From<&Obstacle> for ObstacleView {
    fn from(o: &Obstacle) -> Self {
        Self {
            x: o.x,
            width: o.shape().width,
            gap_top: o.gap_top(),
            gap_bottom: o.gap_bottom(),
            passed: o.passed(),
            upper: o.upper_body(),
            lower: o.lower_body(),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub best_score: u64,
    pub end_reason: Option<EndReason>,
    pub time_ticks: u64,
    pub screen_size: DVec2,
    pub avatar: AvatarView,
    /// Oldest (leftmost) first
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub(crate) fn capture<R>(state: &GameState<R>) -> Self {
        let avatar = state.avatar();
        Self {
            phase: state.phase(),
            score: state.score(),
            best_score: state.best_score(),
            end_reason: state.end_reason(),
            time_ticks: state.time_ticks(),
            screen_size: DVec2::new(state.config().screen_width, state.config().screen_height),
            avatar: AvatarView {
                pos: avatar.pos(),
                size: avatar.size(),
                velocity_y: avatar.velocity_y,
                tilt: avatar.tilt,
                hitbox: avatar.hitbox(),
            },
            obstacles: state.obstacles().iter().map(ObstacleView::from).collect(),
        }
    }

    /// Overlay text for the current phase
    pub fn status_line(&self) -> String {
        match self.phase {
            GamePhase::Idle => "Tap to start".to_string(),
            GamePhase::Running => format!("Score: {}", self.score),
            GamePhase::Ended => format!("Game Over - Score: {}", self.score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    #[test]
    fn test_capture_idle() {
        let state = GameState::new(GameConfig::default(), 11).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Idle);
        assert_eq!(snap.screen_size, DVec2::new(400.0, 600.0));
        assert_eq!(snap.avatar.pos, DVec2::new(50.0, 300.0));
        assert!(snap.obstacles.is_empty());
        assert_eq!(snap.status_line(), "Tap to start");
    }

    #[test]
    fn test_capture_running() {
        let mut state = GameState::new(GameConfig::default(), 11).unwrap();
        state.start_run();
        let snap = state.snapshot();
        assert_eq!(snap.obstacles.len(), 1);
        let view = &snap.obstacles[0];
        assert_eq!(view.x, 650.0);
        assert!((view.gap_bottom - view.gap_top - 200.0).abs() < 1e-9);
        assert_eq!(view.lower.min.y, view.gap_bottom);
        assert!((view.upper.max.y - view.gap_top).abs() < 1e-9);
        assert_eq!(snap.status_line(), "Score: 0");
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut state = GameState::new(GameConfig::default(), 11).unwrap();
        state.start_run();
        let mut snap = state.snapshot();
        snap.avatar.pos.y = -1000.0;
        snap.obstacles.clear();
        assert_eq!(state.avatar().y(), 300.0);
        assert_eq!(state.obstacles().len(), 1);
    }

    #[test]
    fn test_serializes() {
        let state = GameState::new(GameConfig::default(), 11).unwrap();
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Idle\""));
    }
}
