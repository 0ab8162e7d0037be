// Fighter archive data
//
// Move tables arrive from an external binary-archive loader; this module
// owns their in-memory form, validation, and matching.

mod moves;
mod table;

pub use moves::{
    HitClass, HitWindow, InputSignature, MoveDefinition, MoveKind, MoveSlot, MoveTuning,
};
pub use table::{MoveTable, MoveTableBuilder, MoveTableLoader};

/// Move table loading and validation errors
///
/// All of these are fatal to fighter creation; no partially loaded
/// fighter is left alive.
#[derive(Debug, thiserror::Error)]
pub enum MoveTableError {
    #[error("required move slot missing: {0:?}")]
    MissingSlot(MoveSlot),

    #[error("move slot declared twice: {0:?}")]
    DuplicateSlot(MoveSlot),

    #[error("attack move has an empty input signature: {0}")]
    EmptySignature(String),

    #[error("unknown input symbol {0:?} in signature \"{1}\"")]
    BadSignature(char, String),

    #[error("hit window outside animation frames: {0}")]
    BadHitWindow(String),

    #[error("unknown fighter id: {0}")]
    UnknownFighter(String),
}
