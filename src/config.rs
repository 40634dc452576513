use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::GridSize;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 15;

/// Default snake length at game start.
pub const DEFAULT_SNAKE_LENGTH: u16 = 3;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Configuration problems detected before a game starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    #[error("initial snake length {length} does not fit a grid {width} cells wide")]
    SnakeTooLong { length: u16, width: u16 },
    #[error("a snake of length {length} leaves no room for food on a {width}x{height} grid")]
    NoRoomForFood { length: u16, width: u16, height: u16 },
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings fixed for the lifetime of one game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid: GridSize,
    pub wrap_around: bool,
    pub initial_snake_length: u16,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT),
            wrap_around: false,
            initial_snake_length: DEFAULT_SNAKE_LENGTH,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Creates a wall-bounded configuration with the given grid and defaults
    /// for everything else.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            grid: GridSize::new(width, height),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_wrap_around(mut self, wrap_around: bool) -> Self {
        self.wrap_around = wrap_around;
        self
    }

    #[must_use]
    pub fn with_initial_snake_length(mut self, length: u16) -> Self {
        self.initial_snake_length = length;
        self
    }

    /// Parses a JSON document; omitted fields keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks that a game can start with these settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_board()?;

        let GridSize { width, height } = self.grid;
        let length = self.initial_snake_length;
        if length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if length > width {
            return Err(ConfigError::SnakeTooLong { length, width });
        }
        if usize::from(length) >= self.grid.total_cells() {
            return Err(ConfigError::NoRoomForFood {
                length,
                width,
                height,
            });
        }

        Ok(())
    }

    /// Checks the grid and tick interval only, leaving the initial snake
    /// length out. Used when the snake is supplied explicitly.
    pub fn validate_board(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(())
    }

    /// Returns the scheduler interval between ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
