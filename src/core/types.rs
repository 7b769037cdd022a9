//! Grid model types shared by the navigation engine and device drivers.
//!
//! The room is a grid of `width × height` cells with the origin in the
//! south-west corner. North is +y and east is +x.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Battery percentage at or below which the robot stops cleaning
pub const RECHARGE_THRESHOLD_PERCENT: i32 = 10;

/// Cell coordinate on the room grid
///
/// Obstacle coordinates use the same type and may lie outside the room
/// when the sensor reports a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell one step ahead in the given heading
    pub fn step(self, facing: Facing) -> Self {
        let (dx, dy) = facing.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Cardinal heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    /// Heading after a 90° clockwise turn
    pub fn right(self) -> Self {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    /// Heading after a 90° counter-clockwise turn
    pub fn left(self) -> Self {
        match self {
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
            Facing::East => Facing::North,
        }
    }

    /// Heading after turning in `rotation`
    pub fn turned(self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::Left => self.left(),
            Rotation::Right => self.right(),
        }
    }

    /// Unit step (dx, dy) for this heading
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::North => (0, 1),
            Facing::East => (1, 0),
            Facing::South => (0, -1),
            Facing::West => (-1, 0),
        }
    }

    /// Single-letter wire symbol
    pub fn symbol(self) -> char {
        match self {
            Facing::North => 'N',
            Facing::East => 'E',
            Facing::South => 'S',
            Facing::West => 'W',
        }
    }

    /// Parse a wire symbol back into a heading
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'N' => Some(Facing::North),
            'E' => Some(Facing::East),
            'S' => Some(Facing::South),
            'W' => Some(Facing::West),
            _ => None,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Direction of an in-place rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    Left,
    Right,
}

/// Atomic action decoded from a command string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `f`: advance one cell
    MoveForward,
    /// `l`: rotate 90° counter-clockwise
    TurnLeft,
    /// `r`: rotate 90° clockwise
    TurnRight,
}

impl Action {
    /// Decode a single command character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'f' => Some(Action::MoveForward),
            'l' => Some(Action::TurnLeft),
            'r' => Some(Action::TurnRight),
            _ => None,
        }
    }
}

/// Power mode derived from the last battery reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BatteryMode {
    #[default]
    Cleaning,
    Recharging,
}

impl BatteryMode {
    /// Classify a battery percentage against the recharge threshold
    pub fn from_percent(percent: i32) -> Self {
        if percent <= RECHARGE_THRESHOLD_PERCENT {
            BatteryMode::Recharging
        } else {
            BatteryMode::Cleaning
        }
    }
}

/// Room dimensions in cells, both strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSize {
    width: i32,
    height: i32,
}

impl RoomSize {
    /// Validate room dimensions
    pub fn new(room_x: u32, room_y: u32) -> Result<Self> {
        Ok(Self {
            width: dimension("room_x", room_x)?,
            height: dimension("room_y", room_y)?,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check whether a cell lies inside the room
    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }
}

fn dimension(name: &str, value: u32) -> Result<i32> {
    i32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| {
            Error::InvalidParameter(format!("{} must be in 1..={}, got {}", name, i32::MAX, value))
        })
}
