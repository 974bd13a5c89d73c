// Scenery entities: background, platform, clouds

use crate::core::math::Rect;
use crate::engine::renderer::scene::{
    Color, Scene, SpriteSlot, CANVAS_HEIGHT, CANVAS_WIDTH,
};
use crate::game::GROUND_Y;
use rand::Rng;

/// Leftward cloud drift (units per tick), slower than obstacles for parallax
pub const CLOUD_SPEED: f32 = 5.0;

/// Where fresh clouds appear
pub const CLOUD_SPAWN_X: f32 = 1500.0;

pub const CLOUD_WIDTH: f32 = 200.0;
pub const CLOUD_HEIGHT: f32 = 90.0;

/// The two altitudes a cloud can spawn at, picked 50/50
pub const CLOUD_LANES: [f32; 2] = [100.0, 200.0];

/// Thickness of the ground strip below [`GROUND_Y`]
pub const PLATFORM_THICKNESS: f32 = 50.0;

/// A drifting cloud
#[derive(Debug)]
pub struct Cloud {
    x: f32,
    y: f32,
}

impl Cloud {
    /// Spawn a cloud at the right edge in a random lane
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let lane = if rng.random_bool(0.5) {
            CLOUD_LANES[0]
        } else {
            CLOUD_LANES[1]
        };
        Self {
            x: CLOUD_SPAWN_X,
            y: lane,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}

/// Non-interactive world dressing
///
/// Background and platform are static; only clouds move. Coverage bounds:
/// background and clouds report the full canvas, the platform reports the
/// ground strip. None of these ever enters a collision test.
#[derive(Debug)]
pub enum Scenery {
    Background,
    Platform,
    Cloud(Cloud),
}

impl Scenery {
    /// Advance one fixed tick
    pub fn update(&mut self) {
        if let Scenery::Cloud(cloud) = self {
            cloud.x -= CLOUD_SPEED;
        }
    }

    /// Append this frame's draw commands
    pub fn draw(&self, scene: &mut Scene) {
        match self {
            Scenery::Background => {
                scene.fill_rect(
                    Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
                    Color::LIGHT_BLUE,
                );
            }
            Scenery::Platform => {
                scene.fill_rect(
                    Rect::new(0.0, GROUND_Y, CANVAS_WIDTH, PLATFORM_THICKNESS),
                    Color::GREEN,
                );
            }
            Scenery::Cloud(cloud) => {
                scene.blit(
                    SpriteSlot::Cloud,
                    cloud.x,
                    cloud.y,
                    CLOUD_WIDTH,
                    CLOUD_HEIGHT,
                );
            }
        }
    }

    /// Coverage box
    pub fn bounds(&self) -> Rect {
        match self {
            Scenery::Background | Scenery::Cloud(_) => {
                Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT)
            }
            Scenery::Platform => {
                Rect::new(0.0, GROUND_Y, CANVAS_WIDTH, PLATFORM_THICKNESS)
            }
        }
    }

    /// The entity's own x, used for culling (static scenery never culls)
    pub fn x(&self) -> f32 {
        match self {
            Scenery::Background | Scenery::Platform => 0.0,
            Scenery::Cloud(cloud) => cloud.x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_cloud_spawns_in_a_known_lane() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let cloud = Cloud::spawn(&mut rng);
            assert_eq!(cloud.x(), CLOUD_SPAWN_X);
            assert!(CLOUD_LANES.contains(&cloud.y()));
        }
    }

    #[test]
    fn test_both_lanes_are_reachable() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            let cloud = Cloud::spawn(&mut rng);
            seen.insert(cloud.y() as i32);
        }
        assert_eq!(seen.len(), CLOUD_LANES.len());
    }

    #[test]
    fn test_cloud_drifts_left_slowly() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut scenery = Scenery::Cloud(Cloud::spawn(&mut rng));
        scenery.update();
        assert_eq!(scenery.x(), CLOUD_SPAWN_X - CLOUD_SPEED);
    }

    #[test]
    fn test_background_and_platform_are_static() {
        let mut background = Scenery::Background;
        let mut platform = Scenery::Platform;
        background.update();
        platform.update();
        assert_eq!(background.x(), 0.0);
        assert_eq!(platform.x(), 0.0);
    }

    #[test]
    fn test_platform_covers_the_ground_strip() {
        let bounds = Scenery::Platform.bounds();
        assert_eq!(bounds.y, GROUND_Y);
        assert_eq!(bounds.height, PLATFORM_THICKNESS);
        assert_eq!(bounds.width, CANVAS_WIDTH);
    }

    #[test]
    fn test_background_covers_the_canvas() {
        let bounds = Scenery::Background.bounds();
        assert_eq!(bounds.width, CANVAS_WIDTH);
        assert_eq!(bounds.height, CANVAS_HEIGHT);
    }
}
