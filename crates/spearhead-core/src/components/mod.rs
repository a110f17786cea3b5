//! Component definitions for the scene's ECS world.
//!
//! Components are data attached to entities through the world, which acts
//! as the side table from (entity, component kind) to value. Behavior
//! lives in systems.

mod behavior;
mod common;
mod objects;

pub use behavior::*;
pub use common::*;
pub use objects::*;
