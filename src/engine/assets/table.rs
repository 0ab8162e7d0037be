// Move table construction, validation, and matching

use std::sync::Arc;

use log::info;

use super::moves::{MoveDefinition, MoveSlot, MoveTuning};
use super::MoveTableError;
use crate::core::math::Rect;
use crate::engine::input::Symbol;

/// Immutable per-fighter-type move collection
///
/// Moves stay in load order; the matcher scans them front to back and the
/// first prefix match wins. Fighters of the same type share one table
/// through an `Arc` and never mutate it.
#[derive(Debug)]
pub struct MoveTable {
    fighter_id: String,
    moves: Vec<MoveDefinition>,
    tuning: MoveTuning,
    hurtbox: Rect,
    slots: [usize; MoveSlot::ALL.len()],
}

impl MoveTable {
    /// Look up a move by its load-order index
    pub fn get(&self, index: usize) -> Option<&MoveDefinition> {
        self.moves.get(index)
    }

    /// Number of loaded moves
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Iterate moves in load order
    pub fn iter(&self) -> impl Iterator<Item = &MoveDefinition> {
        self.moves.iter()
    }

    /// The fighter type this table was loaded for
    pub fn fighter_id(&self) -> &str {
        &self.fighter_id
    }

    /// Movement tuning constants
    pub fn tuning(&self) -> MoveTuning {
        self.tuning
    }

    /// Body hurtbox for this fighter type, in fighter-local coordinates
    pub fn hurtbox(&self) -> Rect {
        self.hurtbox
    }

    /// Index of a required primitive slot (validated present at load)
    pub fn slot(&self, slot: MoveSlot) -> usize {
        self.slots[slot as usize]
    }

    /// The move filling a required primitive slot
    pub fn slot_move(&self, slot: MoveSlot) -> &MoveDefinition {
        &self.moves[self.slot(slot)]
    }

    /// Find the first move whose signature prefixes the given inputs
    ///
    /// `inputs` is read most recent first, matching the input buffer
    /// layout. Earliest load order wins; signatures are never ranked by
    /// length, and empty signatures cannot match.
    pub fn match_prefix(&self, inputs: &[Symbol]) -> Option<(usize, &MoveDefinition)> {
        self.moves.iter().enumerate().find(|(_, mv)| {
            !mv.signature.is_empty() && signature_matches(mv.signature.symbols(), inputs)
        })
    }
}

/// Prefix test between a signature and buffered inputs.
///
/// A repeated buffer symbol may satisfy a single signature symbol, so a
/// doubled direction in the buffer cannot hide the shorter signature
/// behind it ("6K" still prefixes "66K...").
fn signature_matches(signature: &[Symbol], inputs: &[Symbol]) -> bool {
    let mut pos = 0;
    for &expected in signature {
        loop {
            match inputs.get(pos) {
                Some(&sym) if sym == expected => {
                    pos += 1;
                    break;
                }
                // Still inside the run of the previously matched symbol
                Some(&sym) if pos > 0 && sym == inputs[pos - 1] => {
                    pos += 1;
                }
                _ => return false,
            }
        }
    }
    true
}

/// Builder used by loaders (and tests) to assemble a validated table
#[derive(Debug)]
pub struct MoveTableBuilder {
    fighter_id: String,
    moves: Vec<MoveDefinition>,
    tuning: MoveTuning,
    hurtbox: Rect,
}

impl MoveTableBuilder {
    pub fn new(fighter_id: &str, tuning: MoveTuning) -> Self {
        Self {
            fighter_id: fighter_id.to_string(),
            moves: Vec::new(),
            tuning,
            // Roughly torso-sized until the archive says otherwise
            hurtbox: Rect::new(-8.0, 0.0, 16.0, 40.0),
        }
    }

    /// Override the fighter-type hurtbox
    pub fn hurtbox(mut self, hurtbox: Rect) -> Self {
        self.hurtbox = hurtbox;
        self
    }

    /// Append a move in load order
    pub fn push(mut self, definition: MoveDefinition) -> Self {
        self.moves.push(definition);
        self
    }

    /// Validate and build the table
    ///
    /// Fails fast on a missing or duplicated required slot, an attack
    /// move with an empty signature, or a hit window outside its
    /// animation's frames. No partial table escapes.
    pub fn build(self) -> Result<Arc<MoveTable>, MoveTableError> {
        let mut slots = [usize::MAX; MoveSlot::ALL.len()];

        for (index, mv) in self.moves.iter().enumerate() {
            if let Some(slot) = mv.slot {
                if slots[slot as usize] != usize::MAX {
                    return Err(MoveTableError::DuplicateSlot(slot));
                }
                slots[slot as usize] = index;
            } else if mv.signature.is_empty() {
                return Err(MoveTableError::EmptySignature(mv.name.clone()));
            }

            if let Some(hit) = &mv.hit {
                if hit.first_frame > hit.last_frame || hit.last_frame >= mv.frame_count {
                    return Err(MoveTableError::BadHitWindow(mv.name.clone()));
                }
            }
        }

        for slot in MoveSlot::ALL {
            if slots[slot as usize] == usize::MAX {
                return Err(MoveTableError::MissingSlot(slot));
            }
        }

        info!(
            "move table for {} ready: {} moves",
            self.fighter_id,
            self.moves.len()
        );

        Ok(Arc::new(MoveTable {
            fighter_id: self.fighter_id,
            moves: self.moves,
            tuning: self.tuning,
            hurtbox: self.hurtbox,
            slots,
        }))
    }
}

/// Contract of the external archive loader
///
/// The binary archive format lives outside this crate; anything that can
/// produce a validated table per fighter type satisfies the core.
pub trait MoveTableLoader {
    fn load(&self, fighter_id: &str) -> Result<Arc<MoveTable>, MoveTableError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::AnimationId;
    use crate::engine::assets::moves::{HitClass, HitWindow};

    fn tuning() -> MoveTuning {
        MoveTuning {
            forward_speed: 4.0,
            reverse_speed: 3.0,
            jump_speed: -320.0,
            fall_speed: 2.0,
        }
    }

    fn primitives(builder: MoveTableBuilder) -> MoveTableBuilder {
        builder
            .push(MoveDefinition::new("idle", AnimationId(11), 8).with_slot(MoveSlot::Idle))
            .push(MoveDefinition::new("walking", AnimationId(10), 8).with_slot(MoveSlot::Walking))
            .push(
                MoveDefinition::new("crouching", AnimationId(4), 4).with_slot(MoveSlot::Crouching),
            )
            .push(MoveDefinition::new("jumping", AnimationId(1), 6).with_slot(MoveSlot::Jumping))
    }

    #[test]
    fn test_build_requires_all_slots() {
        let err = MoveTableBuilder::new("test", tuning())
            .push(MoveDefinition::new("idle", AnimationId(11), 8).with_slot(MoveSlot::Idle))
            .build()
            .unwrap_err();
        assert!(matches!(err, MoveTableError::MissingSlot(MoveSlot::Walking)));
    }

    #[test]
    fn test_build_rejects_duplicate_slot() {
        let err = primitives(MoveTableBuilder::new("test", tuning()))
            .push(MoveDefinition::new("idle again", AnimationId(12), 8).with_slot(MoveSlot::Idle))
            .build()
            .unwrap_err();
        assert!(matches!(err, MoveTableError::DuplicateSlot(MoveSlot::Idle)));
    }

    #[test]
    fn test_build_rejects_attack_without_signature() {
        let err = primitives(MoveTableBuilder::new("test", tuning()))
            .push(MoveDefinition::new("mystery", AnimationId(30), 6))
            .build()
            .unwrap_err();
        assert!(matches!(err, MoveTableError::EmptySignature(name) if name == "mystery"));
    }

    #[test]
    fn test_build_rejects_hit_window_outside_frames() {
        let err = primitives(MoveTableBuilder::new("test", tuning()))
            .push(
                MoveDefinition::new("jab", AnimationId(20), 4)
                    .with_signature("P".parse().unwrap())
                    .with_hit(HitWindow {
                        first_frame: 1,
                        last_frame: 4,
                        hitbox: Rect::new(8.0, 20.0, 10.0, 8.0),
                        damage: 60,
                        class: HitClass::Punch,
                    }),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, MoveTableError::BadHitWindow(name) if name == "jab"));
    }

    #[test]
    fn test_slot_lookup() {
        let table = primitives(MoveTableBuilder::new("test", tuning()))
            .build()
            .expect("valid table");
        assert_eq!(table.slot_move(MoveSlot::Idle).name, "idle");
        assert_eq!(table.slot_move(MoveSlot::Jumping).name, "jumping");
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_match_prefix_earliest_wins_over_longest() {
        // "6K" sits at a lower index than "66K"; with the buffer reading
        // 6 6 K both signatures prefix it, and the earlier entry wins.
        let table = primitives(MoveTableBuilder::new("test", tuning()))
            .push(
                MoveDefinition::new("step kick", AnimationId(21), 6)
                    .with_signature("6K".parse().unwrap()),
            )
            .push(
                MoveDefinition::new("dash kick", AnimationId(22), 6)
                    .with_signature("66K".parse().unwrap())
                    .special(),
            )
            .build()
            .expect("valid table");

        let inputs = [Symbol::Right, Symbol::Right, Symbol::Kick];
        let (index, mv) = table.match_prefix(&inputs).expect("a move matches");
        assert_eq!(index, 4);
        assert_eq!(mv.name, "step kick");
    }

    #[test]
    fn test_match_prefix_declaration_order_beats_later_match() {
        // Reversed declaration: the longer signature now sits first and
        // is selected, still by declaration order alone.
        let table = primitives(MoveTableBuilder::new("test", tuning()))
            .push(
                MoveDefinition::new("dash kick", AnimationId(22), 6)
                    .with_signature("66K".parse().unwrap()),
            )
            .push(
                MoveDefinition::new("step kick", AnimationId(21), 6)
                    .with_signature("6K".parse().unwrap()),
            )
            .build()
            .expect("valid table");

        let inputs = [Symbol::Right, Symbol::Right, Symbol::Kick];
        let (index, mv) = table.match_prefix(&inputs).expect("a move matches");
        assert_eq!(index, 4);
        assert_eq!(mv.name, "dash kick");
    }

    #[test]
    fn test_match_prefix_ignores_empty_signatures() {
        let table = primitives(MoveTableBuilder::new("test", tuning()))
            .build()
            .expect("valid table");
        let inputs = [Symbol::Neutral; 10];
        assert!(table.match_prefix(&inputs).is_none());
    }

    #[test]
    fn test_match_prefix_requires_prefix_not_substring() {
        let table = primitives(MoveTableBuilder::new("test", tuning()))
            .push(
                MoveDefinition::new("jab", AnimationId(20), 4)
                    .with_signature("P".parse().unwrap()),
            )
            .build()
            .expect("valid table");
        // Punch buried behind a newer direction input does not match
        let inputs = [Symbol::Down, Symbol::Punch, Symbol::Neutral];
        assert!(table.match_prefix(&inputs).is_none());
    }

    #[test]
    fn test_signature_matches_collapses_buffer_runs_only() {
        let sig: &[Symbol] = &[Symbol::Right, Symbol::Kick];
        assert!(signature_matches(
            sig,
            &[Symbol::Right, Symbol::Right, Symbol::Kick]
        ));
        // A different symbol in between breaks the run
        assert!(!signature_matches(
            sig,
            &[Symbol::Right, Symbol::Down, Symbol::Kick]
        ));
        // The signature itself is never collapsed
        let doubled: &[Symbol] = &[Symbol::Right, Symbol::Right, Symbol::Kick];
        assert!(!signature_matches(doubled, &[Symbol::Right, Symbol::Kick]));
    }
}
