// Fighter control and animation core for a 2D fighting game
//
// The crate drives fighters through buffered input, move matching,
// platformer-style physics, sprite hit-window collision, and scoring.
// Archive loading and rendering live outside; they talk to the core
// through the `MoveTableLoader` and `AnimationSink` contracts.

pub mod core;
pub mod engine;
pub mod game;
