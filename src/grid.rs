use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::Direction;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Creates grid dimensions.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Iterates every cell row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }
}

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }

    /// Returns the neighbouring position one step along `direction`, unclamped.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    let wrapped = value % upper_bound;
    if wrapped < 0 {
        wrapped + upper_bound
    } else {
        wrapped
    }
}

/// Failures of the spatial queries.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GridError {
    #[error("no free cell left on the {width}x{height} grid")]
    NoSpaceAvailable { width: u16, height: u16 },
}

/// Returns the position one unit along `direction`.
///
/// With `wrap_around` the result is folded back onto the torus; otherwise the
/// raw coordinate is returned so the caller can detect leaving the grid.
#[must_use]
pub fn translate(
    position: Position,
    direction: Direction,
    bounds: GridSize,
    wrap_around: bool,
) -> Position {
    let next = position.stepped(direction);
    if wrap_around { next.wrapped(bounds) } else { next }
}

/// Returns true when `a` and `b` are one step apart along a single axis.
///
/// On a wrapping grid, cells on opposite edges of the same row or column count
/// as adjacent.
#[must_use]
pub fn are_adjacent(a: Position, b: Position, bounds: GridSize, wrap_around: bool) -> bool {
    Direction::ALL
        .iter()
        .any(|direction| translate(a, *direction, bounds, wrap_around) == b)
}

/// Picks a cell uniformly at random among the cells not in `occupied`.
pub fn random_free_position<R: Rng + ?Sized>(
    rng: &mut R,
    occupied: &HashSet<Position>,
    bounds: GridSize,
) -> Result<Position, GridError> {
    let candidates: Vec<Position> = bounds
        .cells()
        .filter(|position| !occupied.contains(position))
        .collect();

    if candidates.is_empty() {
        return Err(GridError::NoSpaceAvailable {
            width: bounds.width,
            height: bounds.height,
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
