// Move definitions as delivered by a fighter's archive data

use std::fmt;
use std::str::FromStr;

use super::MoveTableError;
use crate::core::math::Rect;
use crate::engine::animation::AnimationId;
use crate::engine::input::Symbol;

/// Move category from the archive data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Basic attacks and primitives
    Normal,
    /// Command moves with longer signatures
    Special,
}

/// Scoring class a connecting move reports with its hit event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitClass {
    Punch,
    Kick,
    Roundhouse,
}

/// Named slots every move table must fill
///
/// These are the interruptible primitives the matcher falls back to; a
/// table without them cannot drive a fighter, so loading fails fast
/// instead of indexing missing entries at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSlot {
    Idle,
    Walking,
    Crouching,
    Jumping,
}

impl MoveSlot {
    /// All required slots, in validation order
    pub const ALL: [MoveSlot; 4] = [
        MoveSlot::Idle,
        MoveSlot::Walking,
        MoveSlot::Crouching,
        MoveSlot::Jumping,
    ];
}

/// Movement tuning constants embedded in the loaded table
///
/// Speeds are in archive units; walking velocity divides them by the
/// world scale before they reach the integrator.
#[derive(Debug, Clone, Copy)]
pub struct MoveTuning {
    pub forward_speed: f32,
    pub reverse_speed: f32,
    pub jump_speed: f32,
    pub fall_speed: f32,
}

/// An ordered symbol sequence that triggers a move when it prefixes the
/// fighter's input buffer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputSignature(Vec<Symbol>);

impl InputSignature {
    /// The empty signature (never matches)
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Symbols in match order (most recent input first)
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }
}

impl FromStr for InputSignature {
    type Err = MoveTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut symbols = Vec::with_capacity(s.len());
        for c in s.chars() {
            let symbol = Symbol::from_char(c)
                .ok_or_else(|| MoveTableError::BadSignature(c, s.to_string()))?;
            symbols.push(symbol);
        }
        Ok(Self(symbols))
    }
}

impl fmt::Display for InputSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

/// Active attack data for a move that can connect
#[derive(Debug, Clone, Copy)]
pub struct HitWindow {
    /// First animation frame on which the hitbox is live
    pub first_frame: u32,
    /// Last live frame, inclusive
    pub last_frame: u32,
    /// Hit rectangle in fighter-local coordinates: x extends toward the
    /// fighter's facing, y upward from the ground anchor
    pub hitbox: Rect,
    /// Damage dealt on contact
    pub damage: i32,
    /// Scoring class reported with the hit event
    pub class: HitClass,
}

/// A single move: input signature, animation handle, and attack data
///
/// Immutable once loaded; owned by the `MoveTable`.
#[derive(Debug, Clone)]
pub struct MoveDefinition {
    pub name: String,
    pub signature: InputSignature,
    pub animation: AnimationId,
    pub kind: MoveKind,
    pub slot: Option<MoveSlot>,
    pub frame_count: u32,
    pub hit: Option<HitWindow>,
}

impl MoveDefinition {
    /// Create a move with no signature, slot, or hit data
    pub fn new(name: &str, animation: AnimationId, frame_count: u32) -> Self {
        Self {
            name: name.to_string(),
            signature: InputSignature::empty(),
            animation,
            kind: MoveKind::Normal,
            slot: None,
            frame_count: frame_count.max(1),
            hit: None,
        }
    }

    /// Attach the input signature that triggers this move
    pub fn with_signature(mut self, signature: InputSignature) -> Self {
        self.signature = signature;
        self
    }

    /// Mark this move as filling a required primitive slot
    pub fn with_slot(mut self, slot: MoveSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Mark this move as a special (command) move
    pub fn special(mut self) -> Self {
        self.kind = MoveKind::Special;
        self
    }

    /// Attach the active hit window
    pub fn with_hit(mut self, hit: HitWindow) -> Self {
        self.hit = Some(hit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_parsing() {
        let sig: InputSignature = "66K".parse().expect("valid signature");
        assert_eq!(
            sig.symbols(),
            &[Symbol::Right, Symbol::Right, Symbol::Kick]
        );
        assert_eq!(sig.to_string(), "66K");
    }

    #[test]
    fn test_signature_rejects_unknown_symbol() {
        let err = "6X".parse::<InputSignature>().unwrap_err();
        match err {
            MoveTableError::BadSignature(c, s) => {
                assert_eq!(c, 'X');
                assert_eq!(s, "6X");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_move_builder_defaults() {
        let mv = MoveDefinition::new("idle", AnimationId(11), 8);
        assert!(mv.signature.is_empty());
        assert_eq!(mv.kind, MoveKind::Normal);
        assert!(mv.slot.is_none());
        assert!(mv.hit.is_none());
    }

    #[test]
    fn test_move_builder_frame_count_floor() {
        let mv = MoveDefinition::new("broken", AnimationId(1), 0);
        assert_eq!(mv.frame_count, 1);
    }

    #[test]
    fn test_move_builder_chaining() {
        let mv = MoveDefinition::new("dash kick", AnimationId(20), 6)
            .with_signature("66K".parse().unwrap())
            .special()
            .with_hit(HitWindow {
                first_frame: 2,
                last_frame: 4,
                hitbox: Rect::new(8.0, 20.0, 14.0, 10.0),
                damage: 120,
                class: HitClass::Kick,
            });
        assert_eq!(mv.kind, MoveKind::Special);
        assert_eq!(mv.hit.unwrap().damage, 120);
    }
}
