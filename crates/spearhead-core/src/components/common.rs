//! Common components shared across object types.

use serde::{Deserialize, Serialize};

/// 2D vector used for positions and velocities
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Spatial position component - where an object sits in the room
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One of the four cardinal facings. Closed set: all dispatch over it is a
/// total `match`, so an unhandled facing cannot compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Facing of `target` as seen from `from`.
    ///
    /// Vertical separation wins over horizontal, matching how characters
    /// orient toward objects on the tile grid.
    pub fn between(from: &Position, target: &Position) -> Direction {
        if from.y < target.y {
            return Direction::Down;
        }
        if from.y > target.y {
            return Direction::Up;
        }
        if from.x < target.x {
            return Direction::Right;
        }
        Direction::Left
    }

    /// Unit vector for this facing (y grows downward, screen coordinates).
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Error returned when parsing an enum name from level or save data fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown variant name: {}", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl std::str::FromStr for Direction {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UP" => Ok(Direction::Up),
            "DOWN" => Ok(Direction::Down),
            "LEFT" => Ok(Direction::Left),
            "RIGHT" => Ok(Direction::Right),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// How the physics subsystem treats a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Velocity can be written directly; the body moves each tick
    Dynamic,
    /// Immovable; velocity writes are meaningless
    Static,
}

/// Physics body component - the subsystem-tracked velocity representation,
/// distinct from the object's visual placement
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub velocity: Vec2,
    pub kind: BodyKind,
}

impl PhysicsBody {
    pub fn dynamic() -> Self {
        Self {
            velocity: Vec2::ZERO,
            kind: BodyKind::Dynamic,
        }
    }

    pub fn fixed() -> Self {
        Self {
            velocity: Vec2::ZERO,
            kind: BodyKind::Static,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }
}

/// Marks an object that can be switched on and off as a live interactive
/// element (colliders and input, in renderer terms)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Interactive {
    pub enabled: bool,
}

impl Interactive {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

/// Renderable surface state mutated by visual effects. The renderer reads
/// this; the core only ever writes it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Appearance {
    /// Tint color as 0xRRGGBB
    pub tint: u32,
    /// True while the tint fully replaces the texture color
    pub tint_fill: bool,
    pub alpha: f32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            tint: 0xffffff,
            tint_fill: false,
            alpha: 1.0,
        }
    }
}
