// Top-level game session: owns the world and the simulation clock

use crate::engine::game_loop::FrameClock;
use crate::engine::input::Action;
use crate::engine::renderer::scene::Scene;
use crate::game::world::World;
use log::info;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::time::Instant;

/// One running game session
///
/// The entry point constructs exactly one of these and feeds it input
/// actions and frame instants; nothing else touches the world. Input is
/// applied between frames, never while a tick is in progress.
pub struct GameSession {
    world: World,
    clock: FrameClock,
    /// Hands out a fresh world seed per restart
    rng: Pcg32,
}

impl GameSession {
    /// Create a session; the world starts stopped with the start hints up
    pub fn new(seed: u64, now: Instant) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world_seed: u64 = rng.random();
        Self {
            world: World::new(world_seed),
            clock: FrameClock::new(now),
            rng,
        }
    }

    /// Apply one input action
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Jump => self.world.jump(),
            Action::ToggleRun => self.world.toggle_running(),
            Action::Restart => {
                // The only way out of a game over; ignored while running
                if self.world.is_stopped() {
                    let world_seed: u64 = self.rng.random();
                    let mut world = World::new(world_seed);
                    world.start_running();
                    self.world = world;
                    info!("Session restarted");
                }
            }
        }
    }

    /// Run every simulation tick due at `now`; returns how many ran
    pub fn advance(&mut self, now: Instant) -> u32 {
        let ticks = self.clock.begin_frame(now);
        for _ in 0..ticks {
            self.world.tick();
        }
        ticks
    }

    /// Append the frame's draw commands
    pub fn draw(&self, scene: &mut Scene) {
        self.world.draw(scene);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}
