//! Movement and collision core for a single-snake grid game.
//!
//! The engine advances in discrete ticks driven by an outside scheduler and
//! performs no I/O; renderers read [`snapshot::GameSnapshot`] values.

pub mod autopilot;
pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod snake;
pub mod snapshot;

pub use config::GameConfig;
pub use game::{GameState, GameStatus, TickError, TickOutcome};
pub use grid::{GridSize, Position};
pub use input::Direction;
