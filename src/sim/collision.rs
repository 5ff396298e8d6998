//! Collision detection between the avatar and obstacles
//!
//! Everything is axis-aligned, so a hit is a strict rectangle overlap between
//! the avatar hitbox and one of an obstacle's two body hitboxes.

use super::rect::Rect;
use super::state::{Obstacle, ObstacleBody};

/// Which obstacle body (if any) the hitbox overlaps. The upper body is tested first.
pub fn obstacle_hit(avatar_hitbox: &Rect, obstacle: &Obstacle) -> Option<ObstacleBody> {
    if avatar_hitbox.overlaps(&obstacle.upper_hitbox()) {
        Some(ObstacleBody::Upper)
    } else if avatar_hitbox.overlaps(&obstacle.lower_hitbox()) {
        Some(ObstacleBody::Lower)
    } else {
        None
    }
}

/// Check a single obstacle
#[inline]
pub fn check(avatar_hitbox: &Rect, obstacle: &Obstacle) -> bool {
    obstacle_hit(avatar_hitbox, obstacle).is_some()
}

/// First obstacle (in list order) the hitbox overlaps, with the body that was hit
pub fn first_collision(
    avatar_hitbox: &Rect,
    obstacles: &[Obstacle],
) -> Option<(usize, ObstacleBody)> {
    obstacles
        .iter()
        .enumerate()
        .find_map(|(i, o)| obstacle_hit(avatar_hitbox, o).map(|body| (i, body)))
}
