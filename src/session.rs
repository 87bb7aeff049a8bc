//! One terminal play session: the game loop wired to the terminal frontend
//! and the leaderboard.
//!
//! The binary only pumps crossterm events and frame timestamps into a
//! [`Session`]; everything that reacts to them lives here so it can be driven
//! from tests with an in-memory writer and storage.

use std::io::{self, Write};

use tracing::info;

use crate::core::GameState;
use crate::engine::{GameLoop, LogScoreDisplay, LoopControl};
use crate::input::Command;
use crate::scores::{Leaderboard, LeaderboardStorage};
use crate::term::{TerminalFrontend, LEADERBOARD_ROWS};

pub type SessionLoop<W, S> = GameLoop<TerminalFrontend<W>, LogScoreDisplay, Leaderboard<S>>;

pub struct Session<S, W: Write = io::Stdout> {
    game: SessionLoop<W, S>,
}

impl<S, W> Session<S, W>
where
    S: LeaderboardStorage,
    W: Write,
{
    /// Start a session; the side panel gets the stored top scores right away.
    pub fn new(
        state: GameState,
        frontend: TerminalFrontend<W>,
        leaderboard: Leaderboard<S>,
    ) -> Self {
        let mut game = GameLoop::new(state, frontend, LogScoreDisplay, leaderboard);
        let top = game.recorder().top(LEADERBOARD_ROWS);
        game.renderer_mut().set_leaderboard(top);
        Self { game }
    }

    pub fn game(&self) -> &SessionLoop<W, S> {
        &self.game
    }

    pub fn frontend(&self) -> &TerminalFrontend<W> {
        self.game.renderer()
    }

    pub fn frontend_mut(&mut self) -> &mut TerminalFrontend<W> {
        self.game.renderer_mut()
    }

    /// Apply a key command. Returns `false` once the player asked to quit.
    pub fn command(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::Restart => {
                info!("restart");
                self.game.reset();
                self.refresh_leaderboard();
            }
            Command::Play(action) => {
                let was_halted = self.game.is_halted();
                self.game.handle(action);
                self.on_halt(was_halted);
            }
        }
        true
    }

    /// Advance the game to `timestamp_ms`; a halted game is left alone.
    pub fn frame(&mut self, timestamp_ms: u64) -> LoopControl {
        if self.game.is_halted() {
            return LoopControl::Halted;
        }
        let control = self.game.frame(timestamp_ms);
        self.on_halt(false);
        control
    }

    /// Repaint everything, e.g. after the terminal was resized.
    pub fn repaint(&mut self) {
        self.game.renderer_mut().invalidate();
        self.game.redraw();
    }

    /// Push the stored top scores into the side panel and redraw.
    pub fn refresh_leaderboard(&mut self) {
        let top = self.game.recorder().top(LEADERBOARD_ROWS);
        self.game.renderer_mut().set_leaderboard(top);
        self.game.redraw();
    }

    /// The game just ended if it is halted now but was not before: the final
    /// score has been saved, so show it.
    fn on_halt(&mut self, was_halted: bool) {
        if !was_halted && self.game.is_halted() {
            self.refresh_leaderboard();
        }
    }
}
