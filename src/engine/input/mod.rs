// Input handling system
//
// Controller events arrive as `Action`s, already normalized by the outer
// input layer. Each fighter translates actions into facing-relative
// numpad `Symbol`s and records them in its `InputBuffer`, which move
// signatures are matched against.

pub mod action;
pub mod buffer;

// Re-export commonly used types
pub use action::{Action, Facing, Symbol};
pub use buffer::{InputBuffer, BUFFER_CAPACITY};
