// Tick integration for fighter movement
//
// Coordinates are arena units with y growing downward; the floor sits
// near the bottom of the 320x200 play area.

use glam::Vec2;

use crate::core::math::clamp;

/// Leftmost x a fighter may occupy
pub const ARENA_LEFT: f32 = 10.0;
/// Rightmost x a fighter may occupy
pub const ARENA_RIGHT: f32 = 310.0;
/// Absolute lowest y position, clamped every tick
pub const ARENA_BOTTOM: f32 = 200.0;
/// Level a fighter stands at; crossing it means landing
pub const GROUND_LINE: f32 = 190.0;
/// Sub-pixel scale applied to vertical velocity each tick
pub const VERTICAL_DAMPING: f32 = 0.003;

/// Point-mass state integrated once per tick
///
/// Velocities are bounded by the move-table tuning constants, so the
/// integrator needs no divergence guards.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity: f32,
}

impl Body {
    /// Create a body at rest
    pub fn new(position: Vec2, gravity: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            gravity,
        }
    }

    /// Check whether the body is above the ground line
    pub fn is_airborne(&self) -> bool {
        self.position.y < GROUND_LINE
    }

    /// Integrate one tick of movement.
    ///
    /// Gravity accumulates into vertical velocity, position advances with
    /// the vertical damping scale, and crossing the ground line clamps
    /// position and zeroes vertical velocity. Returns true when the body
    /// ends the tick on the ground.
    pub fn integrate(&mut self) -> bool {
        self.position.x += self.velocity.x;
        self.velocity.y += self.gravity;
        self.position.y += self.velocity.y * VERTICAL_DAMPING;

        if self.position.y > GROUND_LINE {
            self.position.y = GROUND_LINE;
            self.velocity.y = 0.0;
            return true;
        }
        !self.is_airborne()
    }

    /// Clamp position into the arena play area; velocity is untouched
    pub fn clamp_to_arena(&mut self) {
        self.position.x = clamp(self.position.x, ARENA_LEFT, ARENA_RIGHT);
        if self.position.y > ARENA_BOTTOM {
            self.position.y = ARENA_BOTTOM;
        }
    }
}
