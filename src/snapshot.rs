use serde::{Deserialize, Serialize};

use crate::game::{CollisionKind, GameStatus};
use crate::grid::{GridSize, Position};
use crate::input::Direction;

/// Plain-data view of a game handed to renderers and other observers.
///
/// Holds no references into the engine, so it can be kept across ticks or
/// serialized as-is.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: GridSize,
    pub wrap_around: bool,
    pub status: GameStatus,
    /// Body cells, head first.
    pub snake: Vec<Position>,
    /// Body cells as they were before the latest tick.
    pub snake_last_pos: Vec<Position>,
    pub food: Option<Position>,
    pub heading: Option<Direction>,
    pub collision: Option<CollisionKind>,
    pub score: u32,
    pub tick_count: u64,
}

impl GameSnapshot {
    /// Returns cells the snake left during the latest tick.
    #[must_use]
    pub fn vacated_cells(&self) -> Vec<Position> {
        self.snake_last_pos
            .iter()
            .filter(|cell| !self.snake.contains(cell))
            .copied()
            .collect()
    }

    /// Returns cells the snake entered during the latest tick.
    #[must_use]
    pub fn entered_cells(&self) -> Vec<Position> {
        self.snake
            .iter()
            .filter(|cell| !self.snake_last_pos.contains(cell))
            .copied()
            .collect()
    }
}
