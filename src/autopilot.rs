//! Greedy steering used by the headless driver in place of a human player.

use std::cmp::Reverse;

use crate::game::GameState;
use crate::grid::{GridSize, Position, translate};
use crate::input::{Direction, direction_change_is_valid};

/// Picks the heading that brings the head closest to the food without dying
/// on the next tick.
///
/// Ties are broken by how many safe exits the target cell keeps open, then by
/// staying on the current heading. Returns `None` when every move is fatal.
#[must_use]
pub fn choose_direction(state: &GameState) -> Option<Direction> {
    let snake = state.snake();
    let config = state.config();
    let current = snake.heading().or(state.heading());
    let food = state.food();

    Direction::ALL
        .into_iter()
        .filter(|direction| {
            current.is_none_or(|current| {
                direction_change_is_valid(current, *direction, snake.len())
            })
        })
        .filter_map(|direction| {
            let next = translate(snake.head(), direction, config.grid, config.wrap_around);
            if !is_safe(state, next) {
                return None;
            }

            let distance = food.map_or(0, |food| {
                grid_distance(next, food, config.grid, config.wrap_around)
            });
            let exits = safe_exits(state, next);
            let keeps_heading = current == Some(direction);
            Some((direction, distance, exits, keeps_heading))
        })
        .min_by_key(|(_, distance, exits, keeps_heading)| {
            (*distance, Reverse(*exits), !*keeps_heading)
        })
        .map(|(direction, ..)| direction)
}

fn is_safe(state: &GameState, next: Position) -> bool {
    let grows = state.food() == Some(next);
    next.is_within_bounds(state.bounds()) && !state.snake().would_collide(next, grows)
}

fn safe_exits(state: &GameState, from: Position) -> usize {
    let config = state.config();
    Direction::ALL
        .into_iter()
        .map(|direction| translate(from, direction, config.grid, config.wrap_around))
        .filter(|cell| *cell != state.snake().head() && is_safe(state, *cell))
        .count()
}

/// Manhattan distance, measured around the torus when the grid wraps.
#[must_use]
pub fn grid_distance(a: Position, b: Position, bounds: GridSize, wrap_around: bool) -> u32 {
    let axis = |from: i32, to: i32, size: u16| {
        let direct = from.abs_diff(to);
        if wrap_around {
            direct.min(u32::from(size) - direct)
        } else {
            direct
        }
    };

    axis(a.x, b.x, bounds.width) + axis(a.y, b.y, bounds.height)
}
