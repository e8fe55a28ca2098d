mod clock;
mod config;
mod constants;
mod entities;
mod explosion;
mod game;
mod rendering;
mod simulation;
mod terminal_io;
mod types;

use std::env;
use std::io::{self, Write};
use crossterm::{
    cursor::{Hide, Show},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};

use crate::config::Config;
use crate::game::Game;
use crate::rendering::{OutputTarget, ScreenBuffer};
use crate::terminal_io::SimulatedInput;

const DEBUG_SCRIPT_FRAMES: u64 = 600;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = Config::from_args(&args);

    simple_logging::log_to_file(&config.log_file, config.log_level)?;
    info!("Starting fireworks with {:?}", config);

    if config.debug_mode_active {
        return run_headless(&config);
    }

    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let result = run_terminal(&config);

    // Restore the terminal even when the display loop failed
    let mut stdout_target = OutputTarget::stdout();
    let restored = stdout_target
        .execute_command(Show)
        .and_then(|_| stdout_target.execute_command(LeaveAlternateScreen))
        .and_then(|_| disable_raw_mode())
        .map_err(|e| { error!("Failed to restore terminal: {}", e); e });

    result?;
    restored
}

fn run_terminal(config: &Config) -> io::Result<()> {
    let (terminal_width, terminal_height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", terminal_width, terminal_height);

    let mut stdout_target = OutputTarget::stdout();
    stdout_target.execute_command(EnterAlternateScreen).map_err(|e| { error!("Failed to enter alternate screen: {}", e); e })?;
    stdout_target.execute_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    stdout_target.flush()?;

    let mut game = Game::new(terminal_width, terminal_height, stdout_target, None, false, config.max_frames);
    let frames = game.run().map_err(|e| { error!("Display loop failed: {}", e); e })?;
    info!("Display ended after {} frames.", frames);
    Ok(())
}

fn run_headless(config: &Config) -> io::Result<()> {
    let (width, height) = (config.debug_width, config.debug_height);
    info!("Debug resolution set to {}x{}", width, height);

    let stdout_target = OutputTarget::ScreenBuffer(ScreenBuffer::new(width, height));
    let script = SimulatedInput::scripted(config.max_frames.unwrap_or(DEBUG_SCRIPT_FRAMES));
    let mut game = Game::new(width, height, stdout_target, Some(script), true, config.max_frames);
    let frames = game.run()?;
    info!("Debug run finished after {} frames.", frames);
    Ok(())
}
