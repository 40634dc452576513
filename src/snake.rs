use std::collections::{HashSet, VecDeque};

use thiserror::Error;

use crate::grid::{GridSize, Position, are_adjacent, translate};
use crate::input::Direction;

/// Reasons an explicit body cannot form a snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SnakeError {
    #[error("snake body must contain at least one segment")]
    Empty,
    #[error("segment {0} lies outside the grid")]
    OutOfBounds(Position),
    #[error("segment {0} appears more than once")]
    Overlap(Position),
    #[error("segments {0} and {1} are not adjacent")]
    Disjoint(Position, Position),
}

/// Snake body, head first.
///
/// The body is never empty. `heading` is the direction of the most recent
/// move, or the one implied by head and neck for a freshly built snake.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    heading: Option<Direction>,
}

impl Snake {
    /// Creates a snake of `length` cells with its head at `head` and the body
    /// trailing off to the left.
    #[must_use]
    pub fn new(head: Position, length: u16) -> Self {
        let length = i32::from(length.max(1));
        let body: VecDeque<Position> = (0..length)
            .map(|offset| Position {
                x: head.x - offset,
                y: head.y,
            })
            .collect();
        let heading = (body.len() > 1).then_some(Direction::Right);

        Self { body, heading }
    }

    /// Creates a snake from explicit body segments (front is head).
    pub fn from_segments(
        segments: Vec<Position>,
        bounds: GridSize,
        wrap_around: bool,
    ) -> Result<Self, SnakeError> {
        if segments.is_empty() {
            return Err(SnakeError::Empty);
        }

        let mut seen = HashSet::with_capacity(segments.len());
        for segment in &segments {
            if !segment.is_within_bounds(bounds) {
                return Err(SnakeError::OutOfBounds(*segment));
            }
            if !seen.insert(*segment) {
                return Err(SnakeError::Overlap(*segment));
            }
        }

        for pair in segments.windows(2) {
            if !are_adjacent(pair[0], pair[1], bounds, wrap_around) {
                return Err(SnakeError::Disjoint(pair[0], pair[1]));
            }
        }

        let heading = segments.get(1).and_then(|neck| {
            Direction::ALL.into_iter().find(|direction| {
                translate(*neck, *direction, bounds, wrap_around) == segments[0]
            })
        });

        Ok(Self {
            body: VecDeque::from(segments),
            heading,
        })
    }

    /// Moves the head to `next_head` while travelling along `heading`.
    ///
    /// Returns the vacated tail cell, or `None` on a growth move.
    pub fn advance(
        &mut self,
        next_head: Position,
        heading: Direction,
        grow: bool,
    ) -> Option<Position> {
        self.heading = Some(heading);
        self.body.push_front(next_head);
        if grow { None } else { self.body.pop_back() }
    }

    /// Returns true when moving the head onto `next_head` would hit the body.
    ///
    /// The tail cell is ignored unless the snake is growing, since it moves out
    /// of the way during the same tick.
    #[must_use]
    pub fn would_collide(&self, next_head: Position, growing: bool) -> bool {
        let checked = if growing {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(checked).any(|segment| *segment == next_head)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the segment right behind the head, if any.
    #[must_use]
    pub fn neck(&self) -> Option<Position> {
        self.body.get(1).copied()
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns the set of cells covered by the body.
    #[must_use]
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the heading of the last move.
    #[must_use]
    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Copies the body into a plain vector, head first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::{GridSize, Position};
    use crate::input::Direction;

    use super::{Snake, SnakeError};

    const BOUNDS: GridSize = GridSize {
        width: 10,
        height: 8,
    };

    #[test]
    fn new_snake_trails_left_of_head() {
        let snake = Snake::new(Position::new(5, 3), 3);

        assert_eq!(
            snake.to_vec(),
            vec![Position::new(5, 3), Position::new(4, 3), Position::new(3, 3)]
        );
        assert_eq!(snake.heading(), Some(Direction::Right));
        assert_eq!(snake.tail(), Position::new(3, 3));
    }

    #[test]
    fn single_cell_snake_has_no_heading() {
        let snake = Snake::new(Position::new(2, 2), 1);

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.heading(), None);
        assert_eq!(snake.neck(), None);
    }

    #[test]
    fn plain_move_drops_tail() {
        let mut snake = Snake::new(Position::new(5, 5), 2);

        let vacated = snake.advance(Position::new(5, 4), Direction::Up, false);

        assert_eq!(vacated, Some(Position::new(4, 5)));
        assert_eq!(snake.to_vec(), vec![Position::new(5, 4), Position::new(5, 5)]);
        assert_eq!(snake.heading(), Some(Direction::Up));
    }

    #[test]
    fn growth_move_keeps_previous_tail() {
        let mut snake = Snake::new(Position::new(5, 5), 1);

        let vacated = snake.advance(Position::new(6, 5), Direction::Right, true);

        assert_eq!(vacated, None);
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn moving_into_vacating_tail_is_not_a_collision() {
        // Square loop: head (1,1) -> (2,1) -> (2,2) -> tail (1,2).
        let snake = Snake::from_segments(
            vec![
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(1, 2),
            ],
            BOUNDS,
            false,
        )
        .expect("valid loop");

        assert!(!snake.would_collide(Position::new(1, 2), false));
        assert!(snake.would_collide(Position::new(1, 2), true));
        assert!(snake.would_collide(Position::new(2, 1), false));
    }

    #[test]
    fn from_segments_infers_heading_from_neck() {
        let snake = Snake::from_segments(
            vec![Position::new(2, 1), Position::new(2, 2)],
            BOUNDS,
            false,
        )
        .expect("valid snake");

        assert_eq!(snake.heading(), Some(Direction::Up));
    }

    #[test]
    fn from_segments_infers_heading_across_wrapped_edge() {
        let snake = Snake::from_segments(
            vec![Position::new(0, 4), Position::new(9, 4)],
            BOUNDS,
            true,
        )
        .expect("valid wrapped snake");

        assert_eq!(snake.heading(), Some(Direction::Right));
    }

    #[test]
    fn from_segments_rejects_broken_bodies() {
        assert_eq!(
            Snake::from_segments(Vec::new(), BOUNDS, false),
            Err(SnakeError::Empty)
        );
        assert_eq!(
            Snake::from_segments(vec![Position::new(10, 0)], BOUNDS, false),
            Err(SnakeError::OutOfBounds(Position::new(10, 0)))
        );
        assert_eq!(
            Snake::from_segments(
                vec![Position::new(1, 1), Position::new(2, 1), Position::new(1, 1)],
                BOUNDS,
                false
            ),
            Err(SnakeError::Overlap(Position::new(1, 1)))
        );
        assert_eq!(
            Snake::from_segments(
                vec![Position::new(1, 1), Position::new(3, 1)],
                BOUNDS,
                false
            ),
            Err(SnakeError::Disjoint(Position::new(1, 1), Position::new(3, 1)))
        );
    }
}
