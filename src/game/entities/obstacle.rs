// Obstacle entity

use crate::core::math::{clamp, Rect};
use crate::engine::renderer::scene::{Color, Scene};
use crate::game::GROUND_Y;

pub const OBSTACLE_SIZE: f32 = 70.0;

/// Leftward scroll speed (units per tick)
pub const OBSTACLE_SPEED: f32 = 10.0;

/// Where the very first obstacle of a world appears
pub const OBSTACLE_INITIAL_X: f32 = 1500.0;

/// Where respawned obstacles appear
pub const OBSTACLE_RESPAWN_X: f32 = 1400.0;

/// Spawn height; below the ground band on purpose, the first tick's clamp
/// settles it onto the ground
pub const OBSTACLE_SPAWN_Y: f32 = 600.0;

/// A ground-level obstacle scrolling toward the player
#[derive(Debug)]
pub struct Obstacle {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Obstacle {
    /// Create an obstacle at the given spawn position
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: OBSTACLE_SIZE,
            height: OBSTACLE_SIZE,
        }
    }

    /// Advance one fixed tick
    pub fn update(&mut self) {
        self.x -= OBSTACLE_SPEED;
        self.y = clamp(self.y, 0.0, GROUND_Y - self.height);
    }

    /// Append this frame's draw commands
    pub fn draw(&self, scene: &mut Scene) {
        scene.fill_rect(self.bounds(), Color::RED);
    }

    /// Current collision box
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_left_at_fixed_speed() {
        let mut obstacle = Obstacle::new(OBSTACLE_INITIAL_X, OBSTACLE_SPAWN_Y);
        obstacle.update();
        assert_eq!(obstacle.x(), OBSTACLE_INITIAL_X - OBSTACLE_SPEED);
        obstacle.update();
        assert_eq!(obstacle.x(), OBSTACLE_INITIAL_X - 2.0 * OBSTACLE_SPEED);
    }

    #[test]
    fn test_first_tick_settles_onto_the_ground() {
        let mut obstacle = Obstacle::new(OBSTACLE_INITIAL_X, OBSTACLE_SPAWN_Y);
        assert_eq!(obstacle.y(), OBSTACLE_SPAWN_Y);
        obstacle.update();
        assert_eq!(obstacle.y(), GROUND_Y - OBSTACLE_SIZE);
    }

    #[test]
    fn test_ground_clamp_is_idempotent_after_settling() {
        let mut obstacle = Obstacle::new(OBSTACLE_INITIAL_X, OBSTACLE_SPAWN_Y);
        obstacle.update();
        let settled = obstacle.y();
        for _ in 0..10 {
            obstacle.update();
            assert_eq!(obstacle.y(), settled);
        }
    }

    #[test]
    fn test_bounds_track_position() {
        let mut obstacle = Obstacle::new(100.0, 600.0);
        obstacle.update();
        let bounds = obstacle.bounds();
        assert_eq!(bounds.x, 90.0);
        assert_eq!(bounds.y, GROUND_Y - OBSTACLE_SIZE);
        assert_eq!(bounds.width, OBSTACLE_SIZE);
        assert_eq!(bounds.height, OBSTACLE_SIZE);
    }
}
