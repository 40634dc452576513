use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::food::Food;
use crate::grid::{GridError, GridSize, Position, translate};
use crate::input::{Direction, direction_change_is_valid};
use crate::snake::{Snake, SnakeError};
use crate::snapshot::GameSnapshot;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Waiting for the first heading.
    Idle,
    Running,
    GameOver,
    Won,
}

impl GameStatus {
    /// Returns true once no further ticks are accepted.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

/// What the head ran into.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionKind {
    Wall,
    SelfCollision,
}

/// Terminal transition reached during a tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Terminal {
    GameOver(CollisionKind),
    Won,
}

/// Cells changed by one movement tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickDelta {
    /// New head cell.
    pub added: Position,
    /// Former tail cell, `None` on a growth tick.
    pub removed: Option<Position>,
}

/// Report returned by every accepted tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickOutcome {
    pub status: GameStatus,
    pub ate_food: bool,
    pub terminal: Option<Terminal>,
    /// `None` when the snake did not move (idle or collision tick).
    pub delta: Option<TickDelta>,
}

impl TickOutcome {
    fn stationary(status: GameStatus, terminal: Option<Terminal>) -> Self {
        Self {
            status,
            ate_food: false,
            terminal,
            delta: None,
        }
    }
}

/// Tick requested after the game already ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum TickError {
    #[error("tick rejected: the game is over")]
    GameOver,
    #[error("tick rejected: the game is already won")]
    AlreadyWon,
}

/// Failures while assembling a game.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Snake(#[from] SnakeError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("food at {0} is outside the grid")]
    FoodOutOfBounds(Position),
    #[error("food at {0} overlaps the snake")]
    FoodOnSnake(Position),
}

/// Complete mutable game state for one session.
///
/// Only this type mutates the snake, its previous body and the food; callers
/// steer through [`GameState::set_direction`] and advance time through
/// [`GameState::tick`].
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    snake: Snake,
    snake_last_pos: Vec<Position>,
    food: Option<Food>,
    pending_direction: Option<Direction>,
    status: GameStatus,
    collision: Option<CollisionKind>,
    score: u32,
    tick_count: u64,
    rng: StdRng,
}

impl GameState {
    /// Creates a game with entropy-seeded food placement.
    pub fn new(config: GameConfig) -> Result<Self, SetupError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, SetupError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, SetupError> {
        config.validate()?;

        let length = config.initial_snake_length;
        let start = Position {
            x: i32::from((config.grid.width / 2).max(length - 1)),
            y: i32::from(config.grid.height / 2),
        };
        let snake = Snake::new(start, length);
        let food = Food::spawn(&mut rng, config.grid, &snake)?;

        Ok(Self::assemble(config, snake, food, rng))
    }

    /// Builds a game from an explicit snake and food cell.
    ///
    /// Used for replaying fixed scenarios; the configured initial length is
    /// ignored in favour of `snake`.
    pub fn with_snake(
        config: GameConfig,
        snake: Snake,
        food: Position,
        seed: u64,
    ) -> Result<Self, SetupError> {
        config.validate_board()?;

        if let Some(outside) = snake
            .segments()
            .find(|segment| !segment.is_within_bounds(config.grid))
        {
            return Err(SnakeError::OutOfBounds(*outside).into());
        }
        if !food.is_within_bounds(config.grid) {
            return Err(SetupError::FoodOutOfBounds(food));
        }
        if snake.occupies(food) {
            return Err(SetupError::FoodOnSnake(food));
        }

        Ok(Self::assemble(
            config,
            snake,
            Food::new(food),
            StdRng::seed_from_u64(seed),
        ))
    }

    fn assemble(config: GameConfig, snake: Snake, food: Food, rng: StdRng) -> Self {
        Self {
            config,
            snake_last_pos: snake.to_vec(),
            snake,
            food: Some(food),
            pending_direction: None,
            status: GameStatus::Idle,
            collision: None,
            score: 0,
            tick_count: 0,
            rng,
        }
    }

    /// Requests a new heading for the next tick.
    ///
    /// Returns whether the request was accepted. A reversal of the heading the
    /// snake last moved in is ignored while the snake is longer than one cell,
    /// as is any request after the game ended. Before the first move the check
    /// uses the orientation of head and neck, so a fresh multi-cell snake
    /// cannot start by turning into itself even though [`GameState::heading`]
    /// is still `None`. The first accepted heading starts the game.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        let length = self.snake.len();
        let reversal = self
            .snake
            .heading()
            .or(self.pending_direction)
            .is_some_and(|current| !direction_change_is_valid(current, requested, length));
        if reversal {
            return false;
        }

        self.pending_direction = Some(requested);
        if self.status == GameStatus::Idle {
            self.status = GameStatus::Running;
        }
        true
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> Result<TickOutcome, TickError> {
        let heading = match (self.status, self.pending_direction) {
            (GameStatus::GameOver, _) => return Err(TickError::GameOver),
            (GameStatus::Won, _) => return Err(TickError::AlreadyWon),
            (GameStatus::Running, Some(heading)) => heading,
            (status, _) => return Ok(TickOutcome::stationary(status, None)),
        };

        self.snake_last_pos = self.snake.to_vec();
        self.tick_count += 1;

        let bounds = self.config.grid;
        let next_head = translate(self.snake.head(), heading, bounds, self.config.wrap_around);
        if !next_head.is_within_bounds(bounds) {
            return Ok(self.collide(CollisionKind::Wall));
        }

        let grows = self.food.is_some_and(|food| food.position == next_head);
        if self.snake.would_collide(next_head, grows) {
            return Ok(self.collide(CollisionKind::SelfCollision));
        }

        let removed = self.snake.advance(next_head, heading, grows);
        let delta = Some(TickDelta {
            added: next_head,
            removed,
        });
        if !grows {
            return Ok(TickOutcome {
                status: self.status,
                ate_food: false,
                terminal: None,
                delta,
            });
        }

        self.score += 1;
        let terminal = match Food::spawn(&mut self.rng, bounds, &self.snake) {
            Ok(food) => {
                self.food = Some(food);
                None
            }
            Err(GridError::NoSpaceAvailable { .. }) => {
                self.food = None;
                self.status = GameStatus::Won;
                Some(Terminal::Won)
            }
        };

        Ok(TickOutcome {
            status: self.status,
            ate_food: true,
            terminal,
            delta,
        })
    }

    fn collide(&mut self, kind: CollisionKind) -> TickOutcome {
        self.status = GameStatus::GameOver;
        self.collision = Some(kind);
        TickOutcome::stationary(self.status, Some(Terminal::GameOver(kind)))
    }

    /// Captures a read-only copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.config.grid,
            wrap_around: self.config.wrap_around,
            status: self.status,
            snake: self.snake.to_vec(),
            snake_last_pos: self.snake_last_pos.clone(),
            food: self.food(),
            heading: self.pending_direction,
            collision: self.collision,
            score: self.score,
            tick_count: self.tick_count,
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Body as it was before the latest tick.
    #[must_use]
    pub fn snake_last_pos(&self) -> &[Position] {
        &self.snake_last_pos
    }

    /// Current food cell; `None` after the board filled up.
    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food.map(|food| food.position)
    }

    /// Heading the next tick will use; `None` until the first accepted input.
    ///
    /// Reversal checks in [`GameState::set_direction`] use the snake's last
    /// move (or its head/neck orientation) rather than this value.
    #[must_use]
    pub fn heading(&self) -> Option<Direction> {
        self.pending_direction
    }

    #[must_use]
    pub fn collision(&self) -> Option<CollisionKind> {
        self.collision
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }
}
