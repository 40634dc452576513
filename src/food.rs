use rand::Rng;

use crate::grid::{GridError, GridSize, Position, random_free_position};
use crate::snake::Snake;

/// Food item currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a cell the snake does not cover.
    ///
    /// Fails with [`GridError::NoSpaceAvailable`] once the snake fills the grid.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
    ) -> Result<Self, GridError> {
        random_free_position(rng, &snake.occupied_cells(), bounds).map(Self::new)
    }
}
