// Per-object behavior hooks driven by the round loop

use crate::engine::input::Action;
use crate::engine::physics::{CollisionProfile, Contact};

/// Capability surface a game object exposes to the round loop
///
/// One implementation per object variant replaces the per-object
/// callback pointers of a classic object table. The round calls the
/// hooks in a fixed order every tick; none of them may block.
pub trait Behavior {
    /// A normalized controller action arrived for this object
    fn on_act(&mut self, action: Action);

    /// Integrate velocity and gravity for this tick
    fn on_move(&mut self);

    /// Per-tick upkeep after movement: bounds and frame advance
    fn on_tick(&mut self);

    /// Test this object's attack against a target snapshot
    fn on_collide(&self, target: &CollisionProfile) -> Option<Contact>;

    /// A non-repeating animation ran to completion
    fn on_finish(&mut self);
}
