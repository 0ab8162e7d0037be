// Fighter physics: tick integration and sprite hit-window collision

mod collision;
mod integrator;

pub use collision::{resolve, CollisionProfile, Contact};
pub use integrator::{
    Body, ARENA_BOTTOM, ARENA_LEFT, ARENA_RIGHT, GROUND_LINE, VERTICAL_DAMPING,
};
