//! Spearhead Core - Dungeon Adventure Game Logic
//!
//! The headless logic layer of a 2D dungeon adventure: object behaviors,
//! throwing physics, timed visual feedback, level transitions and the
//! quiz overlay that gates locked chests. Rendering, asset loading and
//! wallet/payment surfaces live outside this crate and only observe it
//! through the scene's pause/resume and event contracts.
//!
//! # Architecture
//!
//! Built on an Entity Component System via `hecs`:
//! - **Entities**: pots, chests, characters - anything placed in a scene
//! - **Components**: data granting capabilities (Position, PhysicsBody,
//!   Speed, Throwable, Chest); attaching one of a kind replaces the last
//! - **Systems**: logic that queries and updates components each tick
//!
//! A [`scene::GameScene`] owns the world, a clock with one-shot timers and
//! a typed event channel; everything runs single-threaded and cooperative.
//!
//! # Example
//!
//! ```rust,no_run
//! use spearhead_core::prelude::*;
//!
//! let mut scene = GameScene::new(None);
//!
//! let pot = scene.world.spawn((
//!     Position::new(64.0, 64.0),
//!     PhysicsBody::dynamic(),
//!     Interactive::disabled(),
//!     Throwable::silent(),
//! ));
//!
//! scene.throw(pot, Direction::Down);
//!
//! // Run the loop
//! loop {
//!     scene.update(1.0 / 60.0); // 60 FPS
//! }
//! ```

pub mod components;
pub mod config;
pub mod events;
pub mod progress;
pub mod quiz;
pub mod scene;
pub mod scheduler;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::events::{EventChannel, GameEvent};
    pub use crate::progress::{LevelName, LevelTransition, ProgressStore};
    pub use crate::quiz::{QuestionSource, Quiz, QuizFlow, QuizState, StaticQuestionSource};
    pub use crate::scene::GameScene;
}
