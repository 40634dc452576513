use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use grid_snake::autopilot::choose_direction;
use grid_snake::config::GameConfig;
use grid_snake::game::{GameState, GameStatus, Terminal};
use log::{debug, info, warn};

/// Runs a self-playing snake game and reports how it ended.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Let the snake leave one edge and re-enter on the opposite one
    /// (overrides the config file either way).
    #[arg(long, value_name = "true|false")]
    wrap: Option<bool>,

    /// Initial snake length.
    #[arg(long)]
    length: Option<u16>,

    /// Milliseconds between ticks in real-time mode.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks even if the game is still running.
    #[arg(long = "max-ticks", default_value_t = 10_000)]
    max_ticks: u64,

    /// Wait the configured tick interval between ticks.
    #[arg(long)]
    realtime: bool,

    /// Print the final snapshot as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    }
    .wrap_err("failed to set up game")?;

    info!(
        "starting {}x{} game (wrap: {}, length: {})",
        config.grid.width, config.grid.height, config.wrap_around, config.initial_snake_length
    );

    run(&mut state, cli.max_ticks, cli.realtime.then(|| config.tick_interval()))?;

    let snapshot = state.snapshot();
    info!(
        "finished after {} ticks: {:?}, score {}, length {}",
        snapshot.tick_count,
        snapshot.status,
        snapshot.score,
        snapshot.snake.len()
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .wrap_err_with(|| format!("failed to load {}", path.display()))?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid.width = width;
    }
    if let Some(height) = cli.height {
        config.grid.height = height;
    }
    if let Some(wrap) = cli.wrap {
        config.wrap_around = wrap;
    }
    if let Some(length) = cli.length {
        config.initial_snake_length = length;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }

    config.validate()?;
    Ok(config)
}

/// Drives the engine as the external scheduler and input source.
fn run(state: &mut GameState, max_ticks: u64, tick_interval: Option<Duration>) -> Result<()> {
    let mut last_tick = Instant::now();

    while state.tick_count() < max_ticks {
        match choose_direction(state) {
            Some(direction) => {
                if !state.set_direction(direction) {
                    debug!("autopilot heading {direction} rejected");
                }
            }
            None => warn!("no safe move left at tick {}", state.tick_count()),
        }

        if let Some(interval) = tick_interval {
            let elapsed = last_tick.elapsed();
            if elapsed < interval {
                thread::sleep(interval - elapsed);
            }
            last_tick = Instant::now();
        }

        let outcome = state.tick()?;
        debug!(
            "tick {}: {:?} ate_food={} delta={:?}",
            state.tick_count(),
            outcome.status,
            outcome.ate_food,
            outcome.delta
        );

        if outcome.status == GameStatus::Idle {
            warn!("no heading accepted, stopping");
            break;
        }

        match outcome.terminal {
            Some(Terminal::GameOver(kind)) => {
                info!("game over: {kind:?}");
                break;
            }
            Some(Terminal::Won) => {
                info!("board filled, game won");
                break;
            }
            None => {}
        }
    }

    Ok(())
}
