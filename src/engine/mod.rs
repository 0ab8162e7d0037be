// Engine modules: input, assets, physics, animation plumbing

pub mod animation;
pub mod assets;
pub mod input;
pub mod physics;
