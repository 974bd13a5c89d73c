// Player entity and jump state machine

use crate::core::math::{clamp, Rect};
use crate::engine::assets::RUN_FRAME_COUNT;
use crate::engine::renderer::scene::{Scene, SpriteSlot};
use crate::game::GROUND_Y;

pub const PLAYER_WIDTH: f32 = 100.0;
pub const PLAYER_HEIGHT: f32 = 100.0;

/// The player never moves horizontally; the world scrolls past instead
pub const PLAYER_X: f32 = 50.0;

/// Upward speed at the moment of launch (units per tick)
pub const LAUNCH_VELOCITY: f32 = 12.0;

/// Velocity lost per tick while airborne (units per tick squared)
pub const GRAVITY: f32 = 0.5;

/// The sprite art rides slightly lower than the collision box
const SPRITE_Y_OFFSET: f32 = 8.0;

/// The player-controlled runner
///
/// Two states: grounded and jumping. While grounded the launch constants are
/// re-armed every tick, so each jump starts from the same deterministic
/// impulse. While jumping, velocity integrates gravity and position
/// integrates velocity, clamped to the ground band; landing happens exactly
/// when the clamped position reaches the resting height.
#[derive(Debug)]
pub struct Player {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    jumping: bool,
    velocity: f32,
    gravity: f32,
    run_frame: usize,
}

impl Player {
    /// Create a player resting on the ground at the left of the canvas
    pub fn new() -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND_Y - PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            jumping: false,
            velocity: LAUNCH_VELOCITY,
            gravity: GRAVITY,
            run_frame: 0,
        }
    }

    /// The y coordinate the player rests at while grounded
    fn rest_y(&self) -> f32 {
        GROUND_Y - self.height
    }

    /// Launch into a jump; no-op while already airborne (no double-jump)
    pub fn jump(&mut self) {
        if !self.jumping {
            self.jumping = true;
        }
    }

    /// Advance one fixed tick
    ///
    /// `obstacles` is the obstacle bounds snapshot taken at tick start, so
    /// the overlap test runs against the previous tick's resolved positions
    /// (detection trails visual overlap by one tick). Returns true when an
    /// overlap was found; movement still integrates for this tick.
    pub fn update(&mut self, obstacles: &[Rect]) -> bool {
        let bounds = self.bounds();
        let collided = obstacles.iter().any(|o| o.intersects(&bounds));

        if self.jumping {
            self.velocity -= self.gravity;
            self.y -= self.velocity;
            self.y = clamp(self.y, 0.0, self.rest_y());
            if self.y == self.rest_y() {
                self.jumping = false;
            }
        } else {
            // Re-arm the launch constants so the next jump is deterministic
            self.velocity = LAUNCH_VELOCITY;
            self.gravity = GRAVITY;
        }

        self.run_frame = (self.run_frame + 1) % RUN_FRAME_COUNT;

        collided
    }

    /// Append this frame's draw commands
    pub fn draw(&self, scene: &mut Scene) {
        scene.blit(
            SpriteSlot::Run(self.run_frame),
            self.x,
            self.y + SPRITE_Y_OFFSET,
            self.width,
            self.height,
        );
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

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn run_frame(&self) -> usize {
        self.run_frame
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
