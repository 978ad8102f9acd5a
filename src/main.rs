mod assets;
mod config;
mod constants;
mod difficulty;
mod entities;
mod game;
mod high_score;
mod obstacles;
mod rendering;
mod round;
mod terminal_io;
mod types;

use std::io::{self, Write};
use std::env;
use crossterm::{
    terminal::{enable_raw_mode, disable_raw_mode, size},
    cursor::{Hide, Show},
};
use log::{info, error};

use crate::config::Config;
use crate::game::Game;
use crate::high_score::HighScoreStore;
use crate::rendering::{GameGrid, OutputTarget, ScreenBuffer};
use crate::terminal_io::SimulatedInput;

fn main() -> io::Result<()> {
    if let Err(e) = simple_logging::log_to_file("vibe-flappy.log", log::LevelFilter::Info) {
        eprintln!("Logging disabled: {}", e);
    }
    info!("Starting vibe-flappy.");

    let args: Vec<String> = env::args().skip(1).collect();
    let config = Config::from_args(&args);

    if config.debug_mode_active {
        info!("Debug mode enabled. Resolution {}x{}", config.debug_width, config.debug_height);
        let mut game = Game::new(
            config.debug_width,
            config.debug_height,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(config.debug_width, config.debug_height)),
            Some(SimulatedInput::demo_script()),
            HighScoreStore::in_memory(),
            config.max_frames,
        );
        return game.run();
    }

    let high_scores = match HighScoreStore::open() {
        Ok(store) => store,
        Err(e) => {
            error!("High score store unavailable, scores will not be kept: {}", e);
            HighScoreStore::in_memory()
        }
    };

    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let result = play(high_scores, config.max_frames);
    let restored = restore_terminal();
    info!("Exiting vibe-flappy.");
    result.and(restored)
}

fn play(high_scores: HighScoreStore, max_frames: Option<u64>) -> io::Result<()> {
    let (terminal_width, terminal_height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", terminal_width, terminal_height);

    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    GameGrid::new(terminal_width, terminal_height)
        .clear_screen_manual(&mut stdout_target)
        .map_err(|e| { error!("Failed to clear screen: {}", e); e })?;
    stdout_target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    stdout_target.flush()?;

    let mut game = Game::new(terminal_width, terminal_height, stdout_target, None, high_scores, max_frames);
    game.run()?;

    GameGrid::new(game.terminal_width, game.terminal_height).clear_screen_manual(&mut game.stdout_target)?;
    game.stdout_target.flush()
}

fn restore_terminal() -> io::Result<()> {
    let mut stdout = OutputTarget::Stdout(io::stdout());
    stdout.execute_other_command(Show).map_err(|e| { error!("Failed to show cursor on exit: {}", e); e })?;
    disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode on exit: {}", e); e })
}
