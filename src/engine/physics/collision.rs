// Sprite hit-window collision between fighter pairs

use glam::Vec2;

use crate::core::math::Rect;
use crate::engine::assets::{HitClass, HitWindow};
use crate::engine::input::Facing;

/// Read-only snapshot of one fighter for a pair test
///
/// Both profiles are taken before either hit is applied, so the test is
/// symmetric: trading hits on the same tick is possible.
#[derive(Debug, Clone, Copy)]
pub struct CollisionProfile<'a> {
    /// Ground-anchor position in arena coordinates
    pub position: Vec2,
    pub facing: Facing,
    /// Current animation frame of the active move
    pub frame: u32,
    /// Active attack data, if the current move can connect
    pub hit: Option<&'a HitWindow>,
    /// Body hurtbox in fighter-local coordinates
    pub hurtbox: Rect,
}

/// A confirmed overlap between an attacker's hitbox and a defender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub damage: i32,
    pub class: HitClass,
}

/// Test the attacker's active hit rectangle against the defender's hurtbox.
///
/// Emits a contact only while the attacker's frame is inside the move's
/// hit window and the facing-adjusted rectangles overlap in world space.
pub fn resolve(attacker: &CollisionProfile, defender: &CollisionProfile) -> Option<Contact> {
    let window = attacker.hit?;
    if attacker.frame < window.first_frame || attacker.frame > window.last_frame {
        return None;
    }

    let hitbox = world_rect(window.hitbox, attacker.position, attacker.facing);
    let hurtbox = world_rect(defender.hurtbox, defender.position, defender.facing);

    if hitbox.intersects(&hurtbox) {
        Some(Contact {
            damage: window.damage,
            class: window.class,
        })
    } else {
        None
    }
}

/// Map a fighter-local rectangle into arena space.
///
/// Local x extends toward the fighter's facing, local y upward from the
/// ground anchor; arena y grows downward.
fn world_rect(local: Rect, origin: Vec2, facing: Facing) -> Rect {
    let x = match facing {
        Facing::Right => origin.x + local.x,
        Facing::Left => origin.x - local.x - local.w,
    };
    let y = origin.y - local.y - local.h;
    Rect::new(x, y, local.w, local.h)
}
