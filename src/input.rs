use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All headings in clockwise order starting at `Up`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit step `(dx, dy)` for this heading. `y` grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Raised when a string does not name a heading.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown direction `{0}` (expected up, down, left or right)")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "w" => Ok(Self::Up),
            "down" | "d" | "s" => Ok(Self::Down),
            "left" | "l" | "a" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(ParseDirectionError(raw.to_owned())),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
///
/// A snake of length one has no neck to run into, so any heading is allowed.
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction, snake_len: usize) -> bool {
    snake_len <= 1 || next != current.opposite()
}
