use grid_snake::config::GameConfig;
use grid_snake::game::{CollisionKind, GameState, GameStatus, Terminal, TickError};
use grid_snake::grid::{GridSize, Position, translate};
use grid_snake::input::Direction;
use grid_snake::snake::Snake;

fn five_by_five() -> GameConfig {
    GameConfig::new(5, 5).with_initial_snake_length(1)
}

fn state_with(config: GameConfig, body: Vec<Position>, food: Position) -> GameState {
    let snake = Snake::from_segments(body, config.grid, config.wrap_around)
        .expect("test snake should be valid");
    GameState::with_snake(config, snake, food, 17).expect("test state should be valid")
}

#[test]
fn single_cell_snake_moves_right() {
    let mut state = state_with(five_by_five(), vec![Position::new(2, 2)], Position::new(0, 0));

    assert!(state.set_direction(Direction::Right));
    let outcome = state.tick().expect("tick");

    assert!(!outcome.ate_food);
    assert_eq!(outcome.terminal, None);
    assert_eq!(state.snake().to_vec(), vec![Position::new(3, 2)]);
    assert_eq!(state.snake_last_pos(), &[Position::new(2, 2)]);
}

#[test]
fn reversal_request_keeps_current_heading() {
    let mut state = state_with(
        five_by_five(),
        vec![Position::new(2, 2), Position::new(1, 2)],
        Position::new(0, 0),
    );

    assert!(state.set_direction(Direction::Right));
    assert!(!state.set_direction(Direction::Left));
    assert_eq!(state.heading(), Some(Direction::Right));
}

#[test]
fn leaving_a_walled_grid_ends_the_game() {
    let mut state = state_with(five_by_five(), vec![Position::new(4, 2)], Position::new(0, 0));

    assert!(state.set_direction(Direction::Right));
    let outcome = state.tick().expect("tick");

    assert_eq!(outcome.status, GameStatus::GameOver);
    assert_eq!(
        outcome.terminal,
        Some(Terminal::GameOver(CollisionKind::Wall))
    );
    assert_eq!(state.snake().to_vec(), vec![Position::new(4, 2)]);
}

#[test]
fn eating_food_grows_and_relocates_it() {
    let mut state = state_with(
        five_by_five(),
        vec![Position::new(2, 2), Position::new(1, 2)],
        Position::new(3, 2),
    );

    assert!(state.set_direction(Direction::Right));
    let outcome = state.tick().expect("tick");

    assert!(outcome.ate_food);
    assert_eq!(
        state.snake().to_vec(),
        vec![Position::new(3, 2), Position::new(2, 2), Position::new(1, 2)]
    );
    let food = state.food().expect("board still has room");
    assert_ne!(food, Position::new(3, 2));
    assert!(!state.snake().occupies(food));
    assert_eq!(
        outcome.delta.map(|delta| (delta.added, delta.removed)),
        Some((Position::new(3, 2), None))
    );
}

#[test]
fn translate_full_lap_depends_on_wraparound() {
    let bounds = GridSize::new(9, 6);
    let origin = Position::new(4, 3);

    let wrapped = (0..bounds.width).fold(origin, |position, _| {
        translate(position, Direction::Left, bounds, true)
    });
    let walled = (0..bounds.width).fold(origin, |position, _| {
        translate(position, Direction::Left, bounds, false)
    });

    assert_eq!(wrapped, origin);
    assert!(!walled.is_within_bounds(bounds));
}

#[test]
fn ticks_after_game_over_change_nothing() {
    let mut state = state_with(five_by_five(), vec![Position::new(0, 0)], Position::new(4, 4));
    assert!(state.set_direction(Direction::Up));
    state.tick().expect("fatal tick is still accepted");
    let frozen = state.snapshot();

    for _ in 0..3 {
        assert_eq!(state.tick(), Err(TickError::GameOver));
    }

    assert_eq!(state.snapshot(), frozen);
}

#[test]
fn ticks_after_winning_change_nothing() {
    let mut state = state_with(
        GameConfig::new(2, 1),
        vec![Position::new(0, 0)],
        Position::new(1, 0),
    );
    assert!(state.set_direction(Direction::Right));
    let outcome = state.tick().expect("winning tick is accepted");
    assert_eq!(outcome.terminal, Some(Terminal::Won));
    let frozen = state.snapshot();

    for _ in 0..3 {
        assert_eq!(state.tick(), Err(TickError::AlreadyWon));
    }

    assert_eq!(state.snapshot(), frozen);
    assert_eq!(state.snake_last_pos(), &[Position::new(0, 0)]);
    assert_eq!(state.food(), None);
}

#[test]
fn explicit_snake_ignores_configured_length() {
    let config = GameConfig::new(2, 2);
    assert_eq!(config.initial_snake_length, 3);

    let mut state = state_with(config, vec![Position::new(0, 0)], Position::new(1, 1));
    assert_eq!(state.status(), GameStatus::Idle);

    assert!(state.set_direction(Direction::Right));
    let outcome = state.tick().expect("tick");
    assert_eq!(outcome.terminal, None);
    assert_eq!(state.snake().to_vec(), vec![Position::new(1, 0)]);
}

#[test]
fn snake_last_pos_tracks_previous_body() {
    let mut state = state_with(
        GameConfig::new(8, 8),
        vec![Position::new(3, 3), Position::new(2, 3), Position::new(1, 3)],
        Position::new(7, 7),
    );
    assert!(state.set_direction(Direction::Down));

    for _ in 0..3 {
        let before = state.snake().to_vec();
        let outcome = state.tick().expect("tick");
        assert_eq!(state.snake_last_pos(), before.as_slice());

        let delta = outcome.delta.expect("snake moved");
        assert_eq!(delta.added, state.snake().head());
        assert_eq!(delta.removed, before.last().copied());
    }
}

#[test]
fn seeded_random_play_keeps_invariants() {
    for seed in 0..20 {
        let config = GameConfig::new(7, 6).with_wrap_around(seed % 2 == 0);
        let mut state = GameState::new_with_seed(config, seed).expect("valid config");
        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

        for step in 0..200_usize {
            state.set_direction(turns[(step / 3 + seed as usize) % turns.len()]);
            let length_before = state.snake().len();

            let Ok(outcome) = state.tick() else {
                break;
            };

            let body = state.snake().to_vec();
            let distinct: std::collections::HashSet<_> = body.iter().collect();
            assert_eq!(distinct.len(), body.len(), "seed {seed}: body overlaps itself");

            match outcome.terminal {
                Some(Terminal::GameOver(_)) => assert_eq!(body.len(), length_before),
                _ if outcome.ate_food => {
                    assert_eq!(body.len(), length_before + 1);
                    if let Some(food) = state.food() {
                        assert!(!body.contains(&food));
                    }
                }
                _ => assert_eq!(body.len(), length_before),
            }
        }
    }
}
