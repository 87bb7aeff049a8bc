//! Game loop driver
//!
//! [`GameLoop`] owns a [`GameState`] and the collaborators it reports to. It
//! does not schedule itself: the host calls [`GameLoop::frame`] with a
//! monotonic timestamp (from a poll loop, a timer, a test) and forwards input
//! through [`GameLoop::handle`].
//!
//! Per frame: elapsed time since the previous frame feeds the gravity clock,
//! queued engine events are dispatched to the collaborators, and the renderer
//! receives a fresh snapshot. When the game ends the loop halts and stays
//! halted until [`GameLoop::reset`].

pub mod config;

use tracing::{debug, info};

use tetris_arena_core::{GameEvent, GameSnapshot, GameState};

pub use config::LoopConfig;
pub use tetris_arena_types as types;

use crate::types::GameAction;

/// Draws a snapshot of the playfield
pub trait Renderer {
    fn render(&mut self, snapshot: &GameSnapshot);
}

/// Shows the current score and level
pub trait ScoreDisplay {
    fn show(&mut self, score: u32, level: u32);
}

/// Receives the final score once per finished game
pub trait ScoreRecorder {
    fn record_final_score(&mut self, score: u32);
}

/// Renderer that draws nothing (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _snapshot: &GameSnapshot) {}
}

/// Score display backed by the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogScoreDisplay;

impl ScoreDisplay for LogScoreDisplay {
    fn show(&mut self, score: u32, level: u32) {
        info!(score, level, "score");
    }
}

/// Whether the host should keep scheduling frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Halted,
}

pub struct GameLoop<R, D, S> {
    state: GameState,
    renderer: R,
    display: D,
    recorder: S,
    snapshot: GameSnapshot,
    last_timestamp_ms: Option<u64>,
    halted: bool,
}

impl<R, D, S> GameLoop<R, D, S>
where
    R: Renderer,
    D: ScoreDisplay,
    S: ScoreRecorder,
{
    pub fn new(state: GameState, renderer: R, display: D, recorder: S) -> Self {
        let mut game_loop = Self {
            state,
            renderer,
            display,
            recorder,
            snapshot: GameSnapshot::default(),
            last_timestamp_ms: None,
            halted: false,
        };
        game_loop
            .display
            .show(game_loop.state.score(), game_loop.state.level());
        game_loop.dispatch_events();
        game_loop
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn recorder(&self) -> &S {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut S {
        &mut self.recorder
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Run one frame at `timestamp_ms`
    ///
    /// The first frame after construction or reset advances the clock by 0.
    /// A timestamp older than the previous one also counts as 0.
    pub fn frame(&mut self, timestamp_ms: u64) -> LoopControl {
        if self.halted {
            return LoopControl::Halted;
        }

        let delta = match self.last_timestamp_ms {
            Some(last) => timestamp_ms.saturating_sub(last),
            None => 0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);

        self.state.tick(u32::try_from(delta).unwrap_or(u32::MAX));
        self.dispatch_events();
        self.redraw();

        if self.halted {
            LoopControl::Halted
        } else {
            LoopControl::Continue
        }
    }

    /// Apply a player intent; ignored once halted
    pub fn handle(&mut self, action: GameAction) -> bool {
        if self.halted {
            return false;
        }

        let changed = self.state.apply_action(action);
        self.dispatch_events();
        if changed {
            self.redraw();
        }
        changed
    }

    /// Start a new game and re-arm the loop
    pub fn reset(&mut self) {
        self.state.reset();
        self.last_timestamp_ms = None;
        self.halted = false;
        self.display.show(self.state.score(), self.state.level());
        self.dispatch_events();
        self.redraw();
    }

    /// Render the current state without advancing it
    pub fn redraw(&mut self) {
        self.state.snapshot_into(&mut self.snapshot);
        self.renderer.render(&self.snapshot);
    }

    fn dispatch_events(&mut self) {
        for event in self.state.take_events() {
            match event {
                GameEvent::ScoreChanged { score, level } => self.display.show(score, level),
                GameEvent::LevelUp {
                    level,
                    drop_interval_ms,
                } => {
                    info!(level, drop_interval_ms, "level up");
                }
                GameEvent::GameOver { final_score } => {
                    info!(final_score, "game over");
                    self.halted = true;
                    self.recorder.record_final_score(final_score);
                }
                GameEvent::Spawned { kind } => debug!(kind = kind.as_str(), "spawn"),
                GameEvent::Locked { rows_cleared } => debug!(rows_cleared, "lock"),
            }
        }
    }
}
