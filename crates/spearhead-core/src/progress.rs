//! Player progress persistence and level transition payloads.
//!
//! Progress is saved as versioned bincode. A scene reads the store exactly
//! once at start, turning it into an immutable [`LevelTransition`] that the
//! destination scene consumes during initialization.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::components::{DungeonItem, UnknownVariant};

/// Version number for the save format (increment when the format changes)
const SAVE_VERSION: u32 = 1;

/// Playable areas of the game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelName {
    #[default]
    Overworld,
    Dungeon1,
    Dungeon2,
}

impl std::str::FromStr for LevelName {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OVERWORLD" => Ok(LevelName::Overworld),
            "DUNGEON_1" => Ok(LevelName::Dungeon1),
            "DUNGEON_2" => Ok(LevelName::Dungeon2),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Process-wide record of where the player is and what they carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStore {
    pub level: LevelName,
    pub room_id: u32,
    pub door_id: u32,
    /// Items collected so far, in pickup order
    pub items: Vec<DungeonItem>,
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self {
            level: LevelName::Overworld,
            room_id: 0,
            door_id: 0,
            items: Vec::new(),
        }
    }
}

impl ProgressStore {
    pub fn grant_item(&mut self, item: DungeonItem) {
        self.items.push(item);
    }

    pub fn has_item(&self, item: DungeonItem) -> bool {
        self.items.contains(&item)
    }

    /// Save progress to a writer
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        let data = SaveData {
            version: SAVE_VERSION,
            progress: self.clone(),
        };
        bincode::serialize_into(writer, &data)?;
        Ok(())
    }

    /// Load progress from a reader
    pub fn load<R: Read>(reader: R) -> Result<Self, SaveError> {
        let data: SaveData = bincode::deserialize_from(reader)?;

        if data.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: data.version,
            });
        }

        Ok(data.progress)
    }
}

/// On-disk envelope around the progress record
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    progress: ProgressStore,
}

/// Immutable payload carried into the next scene: which level to build and
/// where the player enters it. Write-once per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTransition {
    pub level: LevelName,
    pub room_id: u32,
    pub door_id: u32,
}

impl LevelTransition {
    pub fn from_progress(progress: &ProgressStore) -> Self {
        Self {
            level: progress.level,
            room_id: progress.room_id,
            door_id: progress.door_id,
        }
    }
}

impl Default for LevelTransition {
    /// Explicit first-launch default: overworld start, room 0, door 0.
    fn default() -> Self {
        Self {
            level: LevelName::Overworld,
            room_id: 0,
            door_id: 0,
        }
    }
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}
