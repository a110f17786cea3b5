//! Interactive dungeon object components - chests and timed visual effects.

use serde::{Deserialize, Serialize};

use super::behavior::CompletionCallback;
use crate::config;

/// Items found inside chests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DungeonItem {
    SmallKey,
    BossKey,
    Map,
    Compass,
}

/// Where a chest is in its reveal/unlock lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestState {
    /// Not yet visible in the room
    Hidden,
    /// Visible and waiting for the player to open it
    Revealed,
    /// A quiz cycle is in flight for this chest
    QuizPending,
    /// Opened; contents already granted
    Open,
}

/// A lootable chest. Quiz-locked chests only open after a correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chest {
    pub state: ChestState,
    pub contents: DungeonItem,
    pub requires_quiz: bool,
}

impl Chest {
    pub fn new(contents: DungeonItem) -> Self {
        Self {
            state: ChestState::Revealed,
            contents,
            requires_quiz: false,
        }
    }

    pub fn quiz_locked(contents: DungeonItem) -> Self {
        Self {
            state: ChestState::Revealed,
            contents,
            requires_quiz: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.state = ChestState::Hidden;
        self
    }
}

/// Which half of a flash pulse is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPhase {
    /// Counting down to the next highlight
    AwaitHighlight,
    /// Highlighted; counting down to the revert
    AwaitRevert,
}

/// Fire-and-forget pulsing effect on an object's [`super::Appearance`].
///
/// Pure presentation driven by the scene clock; carries no gameplay state
/// and may run concurrently with any behavior. Attached by
/// [`crate::systems::flash`], advanced and removed by
/// [`crate::systems::flash_system`].
pub struct FlashEffect {
    pub phase: FlashPhase,
    /// Seconds until the current phase fires
    pub remaining: f32,
    pub pulses_done: u32,
    on_complete: Option<CompletionCallback>,
}

impl FlashEffect {
    pub fn new(on_complete: Option<CompletionCallback>) -> Self {
        Self {
            phase: FlashPhase::AwaitHighlight,
            // The first highlight gets a head start on the regular cadence
            remaining: config::FLASH_INTERVAL - config::FLASH_HEAD_START,
            pulses_done: 0,
            on_complete,
        }
    }

    pub(crate) fn take_callback(&mut self) -> Option<CompletionCallback> {
        self.on_complete.take()
    }
}
