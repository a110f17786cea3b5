//! Systems - logic that operates on components

mod chest;
mod flash;
mod physics;
mod throwing;

pub use chest::*;
pub use flash::*;
pub use physics::*;
pub use throwing::*;
