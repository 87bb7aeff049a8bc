//! Terminal Tetris runner (default binary).
//!
//! crossterm drives input and a framebuffer renderer draws the game. Logs go
//! to a file (`TETRIS_LOG_PATH`, filtered by `RUST_LOG`) so they never tear
//! the alternate screen.

use std::env;
use std::fs::File;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tetris_arena::core::GameState;
use tetris_arena::engine::LoopConfig;
use tetris_arena::input::map_key;
use tetris_arena::scores::{FileStorage, ScoresConfig};
use tetris_arena::term::TerminalFrontend;
use tetris_arena::Session;

const DEFAULT_LOG_PATH: &str = "tetris-arena.log";

fn main() -> Result<()> {
    init_logging()?;

    let loop_config = LoopConfig::from_env();
    let scores_config = ScoresConfig::from_env();
    info!(
        seed = loop_config.seed,
        leaderboard = %scores_config.leaderboard_path.display(),
        submit = scores_config.submit_url.is_some(),
        "starting"
    );

    let mut session = Session::new(
        GameState::new(loop_config.seed),
        TerminalFrontend::new(),
        scores_config.open_leaderboard(),
    );

    session.frontend_mut().enter()?;
    let result = run(&mut session, &loop_config);

    // Always try to restore terminal state.
    if let Err(err) = session.frontend_mut().exit() {
        warn!(error = %err, "failed to restore terminal");
    }
    info!(score = session.game().state().score(), "exiting");
    result
}

fn init_logging() -> Result<()> {
    let path = env::var("TETRIS_LOG_PATH").unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());
    let file = File::create(&path).with_context(|| format!("opening log file {path}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(session: &mut Session<FileStorage>, config: &LoopConfig) -> Result<()> {
    let started = Instant::now();
    let frame = config.frame_duration();
    let mut next_frame = started;

    session.repaint();

    loop {
        if let Some(err) = session.frontend_mut().take_error() {
            return Err(err.context("drawing frame"));
        }

        // Input with timeout until the next frame.
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    let game_over = session.game().state().game_over();
                    if let Some(command) = map_key(key, game_over) {
                        if !session.command(command) {
                            return Ok(());
                        }
                    }
                }
                Event::Resize(..) => session.repaint(),
                _ => {}
            }
            continue;
        }

        next_frame = Instant::now() + frame;
        session.frame(elapsed_ms(started));
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
