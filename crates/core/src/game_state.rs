//! Game state module - the playfield engine
//!
//! This module ties together the grid, the piece catalog, the piece source and
//! the scoring rules. It owns every mutation of the playfield: spawning,
//! movement, rotation, locking, row clears, level progression and game over.
//!
//! Spawn, lock and sweep happen synchronously inside a single call, so the
//! only phases a caller can observe are [`Phase::Falling`] and
//! [`Phase::GameOver`].

use std::fmt;

use tracing::debug;

use crate::collision::collides;
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::rng::{PieceSource, UniformSource};
use crate::rotation::try_rotate;
use crate::scoring::Progress;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, PieceKind, COLS, ROWS};

/// Observable lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A piece is falling and intents are accepted
    Falling,
    /// The last spawn collided; only [`GameState::reset`] leaves this phase
    GameOver,
}

/// Something the engine did that collaborators may care about
///
/// Events queue up inside the state until drained with
/// [`GameState::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    Spawned { kind: PieceKind },
    Locked { rows_cleared: u32 },
    ScoreChanged { score: u32, level: u32 },
    LevelUp { level: u32, drop_interval_ms: u32 },
    GameOver { final_score: u32 },
}

/// Complete game state
pub struct GameState {
    grid: Grid,
    active: Piece,
    source: Box<dyn PieceSource>,
    progress: Progress,
    /// Time accumulated since the last drop
    drop_counter_ms: u32,
    phase: Phase,
    events: Vec<GameEvent>,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("grid", &self.grid)
            .field("active", &self.active)
            .field("progress", &self.progress)
            .field("drop_counter_ms", &self.drop_counter_ms)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Create a 12x24 game with uniformly random pieces from `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_source(COLS, ROWS, UniformSource::new(seed))
    }

    /// Create an empty `width x height` game drawing pieces from `source`
    pub fn with_source(width: usize, height: usize, source: impl PieceSource + 'static) -> Self {
        Self::with_grid(Grid::new(width, height), source)
    }

    /// Start a game on a prepared grid
    ///
    /// The first piece spawns immediately, so a grid blocked at the spawn
    /// position yields a game that is already over.
    pub fn with_grid(grid: Grid, source: impl PieceSource + 'static) -> Self {
        let mut source: Box<dyn PieceSource> = Box::new(source);
        let kind = source.next_kind();
        let active = Piece::spawn(kind, grid.width());

        let mut state = Self {
            grid,
            active,
            source,
            progress: Progress::default(),
            drop_counter_ms: 0,
            phase: Phase::Falling,
            events: Vec::new(),
        };
        state.on_spawned();
        state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The falling piece (in [`Phase::GameOver`], the piece that failed to spawn)
    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.progress.drop_interval_ms
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Drain the queued events, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Row the active piece would land on after a hard drop
    pub fn ghost_y(&self) -> Option<i32> {
        if self.game_over() {
            return None;
        }
        Some(self.landing().y)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = if self.game_over() {
            None
        } else {
            Some(ActiveSnapshot::from(self.active))
        };
        out.ghost_y = self.ghost_y();
        out.score = self.progress.score;
        out.level = self.progress.level;
        out.lines = self.progress.lines;
        out.drop_interval_ms = self.progress.drop_interval_ms;
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a player intent
    ///
    /// Returns whether the state changed. Every intent is ignored once the
    /// game is over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over() {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::SoftDrop => {
                self.soft_drop();
                true
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.rotate(),
        }
    }

    /// Advance the gravity clock by `elapsed_ms`
    ///
    /// Once the accumulated time exceeds the drop interval the piece drops one
    /// row (or locks) exactly as a soft drop would. Returns whether it did.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over() {
            return false;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.progress.drop_interval_ms {
            self.soft_drop();
            return true;
        }

        false
    }

    /// Start a new game on the same grid and piece source
    pub fn reset(&mut self) {
        self.grid.clear();
        self.progress = Progress::default();
        self.drop_counter_ms = 0;
        self.phase = Phase::Falling;
        self.events.clear();
        self.spawn();
    }

    fn try_move(&mut self, dx: i32) -> bool {
        let moved = self.active.shifted(dx, 0);
        if collides(&self.grid, &moved) {
            return false;
        }
        self.active = moved;
        true
    }

    fn rotate(&mut self) -> bool {
        match try_rotate(&self.grid, &self.active) {
            Some(rotated) => {
                self.active = rotated;
                true
            }
            None => false,
        }
    }

    /// One row down, locking if the row below is blocked
    fn soft_drop(&mut self) {
        let moved = self.active.shifted(0, 1);
        if collides(&self.grid, &moved) {
            self.lock();
        } else {
            self.active = moved;
        }
        self.drop_counter_ms = 0;
    }

    fn hard_drop(&mut self) {
        self.active = self.landing();
        self.lock();
        self.drop_counter_ms = 0;
    }

    /// The active piece moved down as far as it goes
    fn landing(&self) -> Piece {
        let mut landed = self.active;
        loop {
            let next = landed.shifted(0, 1);
            if collides(&self.grid, &next) {
                return landed;
            }
            landed = next;
        }
    }

    /// Merge the active piece, clear rows, score them and spawn the next piece
    fn lock(&mut self) {
        self.grid.merge(&self.active);
        let rows = self.grid.sweep_full_rows() as u32;
        self.events.push(GameEvent::Locked { rows_cleared: rows });

        if rows > 0 {
            let result = self.progress.apply_clear(rows);
            if result.leveled_up {
                debug!(
                    level = self.progress.level,
                    drop_interval_ms = self.progress.drop_interval_ms,
                    "level up"
                );
                self.events.push(GameEvent::LevelUp {
                    level: self.progress.level,
                    drop_interval_ms: self.progress.drop_interval_ms,
                });
            }
            self.events.push(GameEvent::ScoreChanged {
                score: self.progress.score,
                level: self.progress.level,
            });
        }

        self.spawn();
    }

    fn spawn(&mut self) {
        let kind = self.source.next_kind();
        self.active = Piece::spawn(kind, self.grid.width());
        self.on_spawned();
    }

    fn on_spawned(&mut self) {
        let kind = self.active.kind;
        self.events.push(GameEvent::Spawned { kind });

        if collides(&self.grid, &self.active) {
            self.phase = Phase::GameOver;
            debug!(
                kind = kind.as_str(),
                score = self.progress.score,
                "spawn blocked, game over"
            );
            self.events.push(GameEvent::GameOver {
                final_score: self.progress.score,
            });
        }
    }
}
