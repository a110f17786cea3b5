//! Gameplay tuning constants.

/// Velocity magnitude applied along the thrown axis, units per second
pub const THROW_ITEM_SPEED: f32 = 150.0;

/// Seconds between a successful throw and its settle/completion
pub const THROW_ITEM_DELAY: f32 = 0.5;

/// Downward nudge applied before a down-throw so the item visually
/// originates below the holder
pub const THROW_DOWN_OFFSET: f32 = 20.0;

/// Seconds between flash highlights
pub const FLASH_INTERVAL: f32 = 0.25;

/// Seconds a highlight stays on before reverting
pub const FLASH_REVERT_DELAY: f32 = 0.15;

/// Head start subtracted from the first highlight's wait
pub const FLASH_HEAD_START: f32 = 0.15;

/// Total highlight/revert pulses in one flash cycle
pub const FLASH_PULSES: u32 = 4;
