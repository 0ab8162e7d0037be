// Fighter control: buffered input, move matching, per-tick physics
//
// A fighter owns its body, input buffer, and animation selection. Its
// move table is shared, immutable archive data; selecting a move only
// ever reads it.

use std::sync::Arc;

use glam::Vec2;
use log::{debug, info};

use super::behavior::Behavior;
use crate::engine::animation::{AnimationId, AnimationState};
use crate::engine::assets::{MoveDefinition, MoveSlot, MoveTable};
use crate::engine::input::{Action, Facing, InputBuffer};
use crate::engine::physics::{resolve, Body, CollisionProfile, Contact};

/// Unique identifier for a fighter
pub type FighterId = u32;

/// Divisor turning archive walk speeds into per-tick velocity
const SPEED_DIVISOR: f32 = 320.0;
/// Health at round spawn
pub const MAX_HEALTH: i32 = 1000;
/// Endurance at round spawn
pub const MAX_ENDURANCE: i32 = 1000;
/// Gravity outside a tuned jump arc
const BASE_GRAVITY: f32 = 1.0;

/// A playable fighter instance
#[derive(Debug)]
pub struct Fighter {
    id: FighterId,
    table: Arc<MoveTable>,
    body: Body,
    facing: Facing,
    animation: AnimationState,
    current_move: usize,
    /// The current swing already connected; one contact per swing
    connected: bool,
    health: i32,
    endurance: i32,
    inputs: InputBuffer,
}

impl Fighter {
    /// Spawn a fighter at a position, idling
    pub fn new(id: FighterId, table: Arc<MoveTable>, spawn: Vec2, facing: Facing) -> Self {
        let idle_index = table.slot(MoveSlot::Idle);
        let (animation, frames) = {
            let idle = table.slot_move(MoveSlot::Idle);
            (idle.animation, idle.frame_count)
        };
        info!("fighter {} ({}) ready", id, table.fighter_id());
        Self {
            id,
            body: Body::new(spawn, BASE_GRAVITY),
            facing,
            animation: AnimationState::new(animation, frames, true),
            current_move: idle_index,
            connected: false,
            health: MAX_HEALTH,
            endurance: MAX_ENDURANCE,
            inputs: InputBuffer::new(),
            table,
        }
    }

    pub fn id(&self) -> FighterId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn endurance(&self) -> i32 {
        self.endurance
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn is_airborne(&self) -> bool {
        self.body.is_airborne()
    }

    /// The currently selected move
    pub fn current_move(&self) -> &MoveDefinition {
        self.table
            .get(self.current_move)
            .unwrap_or_else(|| self.table.slot_move(MoveSlot::Idle))
    }

    /// Handle selected for the renderer
    pub fn current_animation(&self) -> AnimationId {
        self.animation.animation()
    }

    /// Current animation frame
    pub fn frame(&self) -> u32 {
        self.animation.frame()
    }

    pub fn is_repeating(&self) -> bool {
        self.animation.is_repeating()
    }

    /// Whether new input can change the current animation
    ///
    /// Only the primitive slots (idle, walking, crouching, jumping) can
    /// be interrupted; every other move plays out.
    pub fn is_interruptible(&self) -> bool {
        self.current_move().slot.is_some()
    }

    /// Feed one action through move matching.
    ///
    /// The action's symbol lands in the input buffer; on a table match
    /// the move's animation is selected and the buffer is consumed. With
    /// no match, a grounded fighter falls back to primitive movement.
    pub fn act(&mut self, action: Action) {
        if !self.is_interruptible() {
            // Mid-move; input is deliberately dropped
            return;
        }
        self.inputs.push(action.symbol(self.facing));

        let matched = self
            .table
            .match_prefix(self.inputs.symbols())
            .map(|(index, mv)| {
                debug!(
                    "fighter {}: matched {} ({}) against {}",
                    self.id, mv.name, mv.signature, self.inputs
                );
                index
            });
        if let Some(index) = matched {
            self.select_move(index, false);
            self.inputs.clear();
            return;
        }

        if self.body.is_airborne() {
            // Drift is governed by the velocity set at takeoff
            return;
        }
        self.fallback_movement(action);
    }

    /// Renderer callback: the current non-repeating animation completed
    pub fn animation_finished(&mut self) {
        self.select_slot(MoveSlot::Idle, true);
    }

    /// Apply a confirmed hit from the opponent
    pub fn take_hit(&mut self, contact: Contact) {
        self.health = (self.health - contact.damage).max(0);
        self.endurance = (self.endurance - contact.damage).max(0);
        debug!(
            "fighter {}: took {} damage, {} health left",
            self.id, contact.damage, self.health
        );
    }

    /// Mark the current swing as having connected
    pub fn mark_connected(&mut self) {
        self.connected = true;
    }

    /// Snapshot for the pair-wise collision test
    pub fn collision_profile(&self) -> CollisionProfile<'_> {
        let hit = if self.connected {
            None
        } else {
            self.current_move().hit.as_ref()
        };
        CollisionProfile {
            position: self.body.position,
            facing: self.facing,
            frame: self.animation.frame(),
            hit,
            hurtbox: self.table.hurtbox(),
        }
    }

    fn select_move(&mut self, index: usize, repeating: bool) {
        let Some(mv) = self.table.get(index) else {
            return;
        };
        let (animation, frames) = (mv.animation, mv.frame_count);
        self.current_move = index;
        self.connected = false;
        self.animation.set(animation, frames, repeating);
    }

    fn select_slot(&mut self, slot: MoveSlot, repeating: bool) {
        let index = self.table.slot(slot);
        self.select_move(index, repeating);
    }

    fn current_slot(&self) -> Option<MoveSlot> {
        self.current_move().slot
    }

    /// Velocity for walking toward a screen direction
    ///
    /// Forward speed applies when moving the way the fighter faces,
    /// reverse speed when backing up.
    fn walk_velocity(&self, toward: Facing) -> f32 {
        let tuning = self.table.tuning();
        let speed = if toward == self.facing {
            tuning.forward_speed
        } else {
            tuning.reverse_speed
        };
        toward.sign() * speed / SPEED_DIVISOR
    }

    /// Primitive movement when no move matched
    fn fallback_movement(&mut self, action: Action) {
        let tuning = self.table.tuning();
        match action {
            a if a.is_downward() => {
                self.select_slot(MoveSlot::Crouching, true);
                self.body.velocity = Vec2::ZERO;
            }
            Action::Stop => {
                if self.current_slot() != Some(MoveSlot::Idle) {
                    self.select_slot(MoveSlot::Idle, true);
                    self.body.velocity = Vec2::ZERO;
                }
            }
            Action::Left => {
                if self.current_slot() != Some(MoveSlot::Walking) {
                    self.select_slot(MoveSlot::Walking, true);
                }
                self.body.velocity = Vec2::new(self.walk_velocity(Facing::Left), 0.0);
            }
            Action::Right => {
                if self.current_slot() != Some(MoveSlot::Walking) {
                    self.select_slot(MoveSlot::Walking, true);
                }
                self.body.velocity = Vec2::new(self.walk_velocity(Facing::Right), 0.0);
            }
            Action::Up => {
                self.select_slot(MoveSlot::Jumping, true);
                self.body.gravity = tuning.fall_speed;
                self.body.velocity = Vec2::new(0.0, tuning.jump_speed);
            }
            Action::UpLeft => {
                self.select_slot(MoveSlot::Jumping, true);
                self.body.gravity = tuning.fall_speed;
                self.body.velocity =
                    Vec2::new(self.walk_velocity(Facing::Left), tuning.jump_speed);
            }
            Action::UpRight => {
                self.select_slot(MoveSlot::Jumping, true);
                self.body.gravity = tuning.fall_speed;
                self.body.velocity =
                    Vec2::new(self.walk_velocity(Facing::Right), tuning.jump_speed);
            }
            _ => {}
        }
    }
}

impl Behavior for Fighter {
    fn on_act(&mut self, action: Action) {
        self.act(action);
    }

    fn on_move(&mut self) {
        let was_airborne = self.body.is_airborne();
        let grounded = self.body.integrate();
        if was_airborne && grounded && self.current_slot() == Some(MoveSlot::Jumping) {
            // Touched down from a jump arc
            self.select_slot(MoveSlot::Idle, true);
            self.body.velocity = Vec2::ZERO;
        }
    }

    fn on_tick(&mut self) {
        self.body.clamp_to_arena();
        if self.animation.tick() {
            self.on_finish();
        }
    }

    fn on_collide(&self, target: &CollisionProfile) -> Option<Contact> {
        resolve(&self.collision_profile(), target)
    }

    fn on_finish(&mut self) {
        self.animation_finished();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Rect;
    use crate::engine::animation::TICKS_PER_FRAME;
    use crate::engine::assets::{HitClass, HitWindow, MoveTableBuilder, MoveTuning};
    use crate::engine::physics::GROUND_LINE;
    use approx::assert_relative_eq;

    const FORWARD: f32 = 480.0;
    const REVERSE: f32 = 320.0;
    const JUMP: f32 = -340.0;
    const FALL: f32 = 2.0;

    fn test_table() -> Arc<MoveTable> {
        MoveTableBuilder::new(
            "test bot",
            MoveTuning {
                forward_speed: FORWARD,
                reverse_speed: REVERSE,
                jump_speed: JUMP,
                fall_speed: FALL,
            },
        )
        .push(MoveDefinition::new("idle", AnimationId(11), 8).with_slot(MoveSlot::Idle))
        .push(MoveDefinition::new("walking", AnimationId(10), 8).with_slot(MoveSlot::Walking))
        .push(MoveDefinition::new("crouching", AnimationId(4), 4).with_slot(MoveSlot::Crouching))
        .push(MoveDefinition::new("jumping", AnimationId(1), 6).with_slot(MoveSlot::Jumping))
        .push(
            MoveDefinition::new("jab", AnimationId(20), 3)
                .with_signature("P".parse().unwrap())
                .with_hit(HitWindow {
                    first_frame: 0,
                    last_frame: 1,
                    hitbox: Rect::new(8.0, 20.0, 14.0, 10.0),
                    damage: 80,
                    class: HitClass::Punch,
                }),
        )
        .push(
            MoveDefinition::new("dash kick", AnimationId(22), 5)
                .with_signature("6K".parse().unwrap())
                .special(),
        )
        .build()
        .expect("valid test table")
    }

    fn grounded_fighter(facing: Facing) -> Fighter {
        Fighter::new(
            1,
            test_table(),
            Vec2::new(100.0, GROUND_LINE),
            facing,
        )
    }

    #[test]
    fn test_spawns_idle_and_healthy() {
        let fighter = grounded_fighter(Facing::Right);
        assert_eq!(fighter.current_move().name, "idle");
        assert!(fighter.is_repeating());
        assert!(fighter.is_interruptible());
        assert_eq!(fighter.health(), MAX_HEALTH);
        assert_eq!(fighter.endurance(), MAX_ENDURANCE);
    }

    #[test]
    fn test_punch_matches_jab_and_consumes_buffer() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Punch);
        assert_eq!(fighter.current_move().name, "jab");
        assert!(!fighter.is_repeating());
        // Buffer was consumed back to neutral
        assert_eq!(fighter.inputs.to_string(), "5555555555");
    }

    #[test]
    fn test_command_move_matches_through_sequence() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Kick);
        // No kick-only move: fell through without matching
        assert_eq!(fighter.current_move().name, "idle");
        fighter.act(Action::Right);
        assert_eq!(fighter.current_move().name, "dash kick");
    }

    #[test]
    fn test_mirrored_command_for_left_facing() {
        let mut fighter = grounded_fighter(Facing::Left);
        fighter.act(Action::Kick);
        // Toward the opponent is screen-left for a left-facing fighter
        fighter.act(Action::Left);
        assert_eq!(fighter.current_move().name, "dash kick");
    }

    #[test]
    fn test_input_ignored_during_attack() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Punch);
        assert_eq!(fighter.current_move().name, "jab");

        fighter.act(Action::Right);
        assert_eq!(fighter.current_move().name, "jab");
        assert_relative_eq!(fighter.velocity().x, 0.0);
    }

    #[test]
    fn test_walk_forward_uses_forward_speed() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Right);
        assert_eq!(fighter.current_move().name, "walking");
        assert!(fighter.is_repeating());
        assert_relative_eq!(fighter.velocity().x, FORWARD / SPEED_DIVISOR);
    }

    #[test]
    fn test_walk_backward_uses_reverse_speed() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Left);
        assert_relative_eq!(fighter.velocity().x, -REVERSE / SPEED_DIVISOR);
    }

    #[test]
    fn test_walk_speeds_mirror_with_facing() {
        let mut fighter = grounded_fighter(Facing::Left);
        // Screen-left is forward for a left-facing fighter
        fighter.act(Action::Left);
        assert_relative_eq!(fighter.velocity().x, -FORWARD / SPEED_DIVISOR);
    }

    #[test]
    fn test_crouch_zeroes_velocity() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Right);
        fighter.act(Action::DownRight);
        assert_eq!(fighter.current_move().name, "crouching");
        assert_relative_eq!(fighter.velocity().x, 0.0);
    }

    #[test]
    fn test_stop_returns_to_idle() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Right);
        fighter.act(Action::Stop);
        assert_eq!(fighter.current_move().name, "idle");
        assert_relative_eq!(fighter.velocity().x, 0.0);
    }

    #[test]
    fn test_jump_sets_velocity_and_fall_gravity() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Up);
        assert_eq!(fighter.current_move().name, "jumping");
        assert_relative_eq!(fighter.velocity().y, JUMP);
        assert_relative_eq!(fighter.velocity().x, 0.0);
        assert_relative_eq!(fighter.body.gravity, FALL);
    }

    #[test]
    fn test_diagonal_jump_forward_carries_walk_speed() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::UpRight);
        assert_relative_eq!(fighter.velocity().x, FORWARD / SPEED_DIVISOR);
        assert_relative_eq!(fighter.velocity().y, JUMP);
    }

    #[test]
    fn test_diagonal_jump_backward_carries_reverse_speed() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::UpLeft);
        assert_relative_eq!(fighter.velocity().x, -REVERSE / SPEED_DIVISOR);
        assert_relative_eq!(fighter.velocity().y, JUMP);
    }

    #[test]
    fn test_airborne_input_does_not_steer() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Up);
        fighter.on_move();
        assert!(fighter.is_airborne());

        fighter.act(Action::Right);
        // Jumping is interruptible but grounded fallback is skipped
        assert_relative_eq!(fighter.velocity().x, 0.0);
        assert_eq!(fighter.current_move().name, "jumping");
    }

    #[test]
    fn test_landing_returns_to_idle() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Up);
        let mut landed = false;
        for _ in 0..5000 {
            fighter.on_move();
            fighter.on_tick();
            if !fighter.is_airborne() && fighter.current_move().name == "idle" {
                landed = true;
                break;
            }
        }
        assert!(landed, "jump must land back into idle");
        assert_relative_eq!(fighter.velocity().y, 0.0);
    }

    #[test]
    fn test_finished_attack_returns_to_idle_repeating() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Punch);
        for _ in 0..TICKS_PER_FRAME * 3 {
            fighter.on_tick();
        }
        assert_eq!(fighter.current_move().name, "idle");
        assert!(fighter.is_repeating());
        assert!(fighter.is_interruptible());
    }

    #[test]
    fn test_finish_callback_resets_to_idle() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Punch);
        fighter.animation_finished();
        assert_eq!(fighter.current_move().name, "idle");
        assert!(fighter.is_repeating());
    }

    #[test]
    fn test_take_hit_floors_at_zero() {
        let mut fighter = grounded_fighter(Facing::Right);
        let contact = Contact {
            damage: 700,
            class: HitClass::Roundhouse,
        };
        fighter.take_hit(contact);
        assert_eq!(fighter.health(), 300);
        assert_eq!(fighter.endurance(), 300);
        fighter.take_hit(contact);
        assert_eq!(fighter.health(), 0);
        assert!(fighter.is_defeated());
    }

    #[test]
    fn test_profile_hides_hit_after_connecting() {
        let mut fighter = grounded_fighter(Facing::Right);
        fighter.act(Action::Punch);
        assert!(fighter.collision_profile().hit.is_some());
        fighter.mark_connected();
        assert!(fighter.collision_profile().hit.is_none());
        // A fresh selection re-arms the swing
        fighter.animation_finished();
        fighter.act(Action::Punch);
        assert!(fighter.collision_profile().hit.is_some());
    }
}
