// Game logic: entities, world state, session control

pub mod entities;
pub mod session;
pub mod world;

/// Top of the ground strip; the floor of the playfield
pub const GROUND_Y: f32 = 450.0;
