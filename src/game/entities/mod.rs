// World entities
//
// Every world object is one variant of a tagged sum, each carrying its own
// state struct. The capability surface (update / draw / bounds) is
// dispatched per variant here, so nothing in the game ever inspects types at
// runtime.

pub mod hud;
pub mod obstacle;
pub mod player;
pub mod scenery;

pub use hud::{Hud, HudView};
pub use obstacle::Obstacle;
pub use player::Player;
pub use scenery::{Cloud, Scenery};

use crate::core::math::Rect;
use crate::engine::renderer::scene::Scene;

/// A world object in the active set
#[derive(Debug)]
pub enum Entity {
    Player(Player),
    Obstacle(Obstacle),
    Scenery(Scenery),
    Hud(Hud),
}

impl Entity {
    /// Advance one fixed tick
    ///
    /// `obstacles` is the obstacle bounds snapshot taken at tick start; only
    /// the player reads it. Returns true when the player reports a collision.
    pub fn update(&mut self, obstacles: &[Rect]) -> bool {
        match self {
            Entity::Player(player) => player.update(obstacles),
            Entity::Obstacle(obstacle) => {
                obstacle.update();
                false
            }
            Entity::Scenery(scenery) => {
                scenery.update();
                false
            }
            Entity::Hud(_) => false,
        }
    }

    /// Append this frame's draw commands; draw order is collection order
    pub fn draw(&self, scene: &mut Scene, view: HudView) {
        match self {
            Entity::Player(player) => player.draw(scene),
            Entity::Obstacle(obstacle) => obstacle.draw(scene),
            Entity::Scenery(scenery) => scenery.draw(scene),
            Entity::Hud(hud) => hud.draw(scene, view),
        }
    }

    /// Current collision or coverage box
    pub fn bounds(&self) -> Rect {
        match self {
            Entity::Player(player) => player.bounds(),
            Entity::Obstacle(obstacle) => obstacle.bounds(),
            Entity::Scenery(scenery) => scenery.bounds(),
            Entity::Hud(hud) => hud.bounds(),
        }
    }

    /// The entity's own x coordinate, used as the culling key
    ///
    /// Deliberately not `bounds().x`: scenery reports coverage boxes pinned
    /// to the canvas, but culling tracks how far the thing itself scrolled.
    pub fn x(&self) -> f32 {
        match self {
            Entity::Player(player) => player.x(),
            Entity::Obstacle(obstacle) => obstacle.x(),
            Entity::Scenery(scenery) => scenery.x(),
            Entity::Hud(hud) => hud.x(),
        }
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, Entity::Obstacle(_))
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self, Entity::Scenery(Scenery::Cloud(_)))
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Entity::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match self {
            Entity::Player(player) => Some(player),
            _ => None,
        }
    }
}
