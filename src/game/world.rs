// World state and the per-tick simulation step

use crate::core::math::Rect;
use crate::engine::renderer::scene::Scene;
use crate::game::entities::{
    hud::HudView,
    obstacle::{Obstacle, OBSTACLE_INITIAL_X, OBSTACLE_RESPAWN_X, OBSTACLE_SPAWN_Y},
    scenery::{Cloud, Scenery},
    Entity, Hud, Player,
};
use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Entities scrolled past this x leave the active set
pub const CULL_X: f32 = -1000.0;

/// One game session's worth of simulation state
///
/// Owns the ordered entity set (order is draw order), the score, and the
/// running flags. Only `tick()` and the input transitions mutate it; a
/// restart replaces the whole world.
pub struct World {
    entities: Vec<Entity>,
    score: u32,
    stopped: bool,
    started: bool,
    rng: Pcg32,
}

impl World {
    /// Build a fresh world, stopped and waiting for the first start toggle
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let entities = vec![
            Entity::Scenery(Scenery::Background),
            Entity::Scenery(Scenery::Cloud(Cloud::spawn(&mut rng))),
            Entity::Scenery(Scenery::Platform),
            Entity::Player(Player::new()),
            Entity::Obstacle(Obstacle::new(OBSTACLE_INITIAL_X, OBSTACLE_SPAWN_Y)),
            Entity::Hud(Hud::new()),
        ];

        Self {
            entities,
            score: 0,
            stopped: true,
            started: false,
            rng,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Flip running/stopped; any toggle marks the session as started for good
    pub fn toggle_running(&mut self) {
        self.started = true;
        self.stopped = !self.stopped;
        info!(
            "{}",
            if self.stopped {
                "Simulation stopped"
            } else {
                "Simulation running"
            }
        );
    }

    /// Enter the running state directly (restart path)
    pub fn start_running(&mut self) {
        self.started = true;
        self.stopped = false;
    }

    /// Launch the player; ignored unless the game is running
    pub fn jump(&mut self) {
        if self.stopped {
            return;
        }
        if let Some(player) = self.entities.iter_mut().find_map(Entity::as_player_mut) {
            player.jump();
        }
    }

    /// One fixed simulation tick
    pub fn tick(&mut self) {
        if self.stopped {
            return;
        }

        // Collision context: obstacle bounds as the previous tick left them
        let obstacle_bounds: Vec<Rect> = self
            .entities
            .iter()
            .filter(|e| e.is_obstacle())
            .map(|e| e.bounds())
            .collect();

        let mut collided = false;
        for entity in &mut self.entities {
            collided |= entity.update(&obstacle_bounds);
        }
        if collided {
            // The rest of this tick still completes; only the next one freezes
            self.stopped = true;
            info!("Collision: game over at score {}", self.score);
        }

        // Cull before the respawn checks so obstacle presence never gaps
        self.entities.retain(|entity| entity.x() >= CULL_X);

        if !self.entities.iter().any(|e| e.is_obstacle()) {
            self.entities.push(Entity::Obstacle(Obstacle::new(
                OBSTACLE_RESPAWN_X,
                OBSTACLE_SPAWN_Y,
            )));
            self.score += 1;
            debug!("Obstacle respawned; score {}", self.score);
        }

        if !self.entities.iter().any(|e| e.is_cloud()) {
            let cloud = Cloud::spawn(&mut self.rng);
            debug!("Cloud respawned in lane {}", cloud.y());
            self.entities.push(Entity::Scenery(Scenery::Cloud(cloud)));
        }
    }

    /// Append this frame's draw commands in entity order
    pub fn draw(&self, scene: &mut Scene) {
        let view = HudView {
            score: self.score,
            started: self.started,
            stopped: self.stopped,
        };
        for entity in &self.entities {
            entity.draw(scene, view);
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn player(&self) -> Option<&Player> {
        self.entities.iter().find_map(Entity::as_player)
    }

    pub fn obstacle_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_obstacle()).count()
    }

    pub fn cloud_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_cloud()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::obstacle::OBSTACLE_SPEED;

    fn running_world() -> World {
        let mut world = World::new(1);
        world.start_running();
        world
    }

    fn obstacle_xs(world: &World) -> Vec<f32> {
        world
            .entities()
            .iter()
            .filter(|e| e.is_obstacle())
            .map(|e| e.x())
            .collect()
    }

    #[test]
    fn test_fresh_world_composition() {
        let world = World::new(0);
        assert_eq!(world.entities().len(), 6);
        assert_eq!(world.score(), 0);
        assert!(world.is_stopped());
        assert!(!world.has_started());
        assert_eq!(world.obstacle_count(), 1);
        assert_eq!(world.cloud_count(), 1);
        assert!(world.player().is_some());
    }

    #[test]
    fn test_stopped_world_is_frozen() {
        let mut world = World::new(0);
        let before = obstacle_xs(&world);
        for _ in 0..10 {
            world.tick();
        }
        assert_eq!(obstacle_xs(&world), before);
    }

    #[test]
    fn test_toggle_latches_started() {
        let mut world = World::new(0);
        world.toggle_running();
        assert!(world.has_started());
        assert!(!world.is_stopped());

        world.toggle_running();
        assert!(world.has_started());
        assert!(world.is_stopped());
    }

    #[test]
    fn test_jump_ignored_while_stopped() {
        let mut world = World::new(0);
        world.jump();
        assert!(!world.player().unwrap().is_jumping());

        world.start_running();
        world.jump();
        assert!(world.player().unwrap().is_jumping());
    }

    #[test]
    fn test_spawn_invariant_holds_every_tick() {
        let mut world = running_world();
        for tick in 0..300 {
            if tick == 120 {
                world.jump();
            }
            world.tick();
            assert!(world.obstacle_count() >= 1, "no obstacle after tick {tick}");
            assert!(world.cloud_count() >= 1, "no cloud after tick {tick}");
        }
        assert!(!world.is_stopped());
    }

    #[test]
    fn test_culling_happens_exactly_at_the_threshold() {
        let mut world = running_world();
        world.jump(); // issued before the danger window opens
        for _ in 0..120 {
            world.tick();
        }
        world.jump();

        // The first obstacle starts at 1500 and loses 10 per tick: it sits
        // exactly on the threshold after 250 ticks and is culled on tick 251
        for _ in 120..250 {
            world.tick();
        }
        assert_eq!(obstacle_xs(&world), vec![CULL_X]);
        assert_eq!(world.score(), 0);

        world.tick();
        assert_eq!(obstacle_xs(&world), vec![OBSTACLE_RESPAWN_X]);
        assert_eq!(world.score(), 1);
    }

    #[test]
    fn test_score_increments_only_on_respawn() {
        let mut world = running_world();
        for tick in 0..300 {
            if tick == 120 {
                world.jump();
            }
            let before = world.score();
            let obstacles_before = obstacle_xs(&world);
            world.tick();
            let respawned = obstacles_before
                .iter()
                .any(|x| x - OBSTACLE_SPEED < CULL_X);
            if respawned {
                assert_eq!(world.score(), before + 1);
            } else {
                assert_eq!(world.score(), before);
            }
        }
        assert_eq!(world.score(), 1);
    }

    #[test]
    fn test_collision_ends_the_run() {
        let mut world = running_world();

        // No jumps: the obstacle walks straight into the player
        let mut stopped_at = None;
        for tick in 0..1000 {
            world.tick();
            if world.is_stopped() {
                stopped_at = Some(tick);
                break;
            }
        }
        let stopped_at = stopped_at.expect("collision never happened");
        assert_eq!(world.score(), 0);

        // Detection trails visual overlap by one tick, so the obstacle still
        // geometrically overlaps the player when the run ends
        let player_bounds = world.player().unwrap().bounds();
        let overlapping = world
            .entities()
            .iter()
            .filter(|e| e.is_obstacle())
            .any(|e| e.bounds().intersects(&player_bounds));
        assert!(overlapping, "stopped without overlap at tick {stopped_at}");

        // Subsequent ticks freeze every entity
        let frozen = obstacle_xs(&world);
        for _ in 0..10 {
            world.tick();
        }
        assert_eq!(obstacle_xs(&world), frozen);
        assert!(world.is_stopped());
    }

    #[test]
    fn test_well_timed_jump_clears_the_obstacle() {
        let mut world = running_world();
        for tick in 0..300 {
            if tick == 120 {
                world.jump();
            }
            world.tick();
            assert!(!world.is_stopped(), "collided at tick {tick}");
        }
        assert!(world.score() >= 1);
        assert!(!world.player().unwrap().is_jumping());
    }

    #[test]
    fn test_collision_detected_within_one_tick_of_overlap() {
        let mut world = running_world();
        let player_bounds = world.player().unwrap().bounds();

        let mut first_overlap = None;
        for tick in 0..1000 {
            world.tick();
            let overlap = world
                .entities()
                .iter()
                .filter(|e| e.is_obstacle())
                .any(|e| e.bounds().intersects(&player_bounds));
            if first_overlap.is_none() && overlap {
                first_overlap = Some(tick);
            }
            if world.is_stopped() {
                assert_eq!(tick, first_overlap.unwrap() + 1);
                return;
            }
        }
        panic!("collision never happened");
    }
}
