//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, driver, rendering, persistence).
//!
//! # Playfield Dimensions
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 24 rows (indexed 0-23, row 0 at the top)
//! - **Spawn position**: horizontally centered, `y = 0`
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Default driver frame interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval on a fresh game |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level-up |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity interval floor |
//!
//! # Examples
//!
//! ```
//! use tetris_arena_types::{GameAction, PieceKind, COLS, ROWS};
//!
//! assert_eq!(PieceKind::T.color(), 6);
//! assert_eq!(PieceKind::from_color(6), Some(PieceKind::T));
//! assert!(GameAction::SoftDrop.repeatable());
//! assert!(!GameAction::Rotate.repeatable());
//!
//! assert_eq!(COLS, 12);
//! assert_eq!(ROWS, 24);
//! ```

/// Playfield width in cells (12 columns)
pub const COLS: usize = 12;

/// Playfield height in cells (24 rows)
pub const ROWS: usize = 24;

/// Default driver frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at the start of every game (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction applied on every level-up
pub const DROP_STEP_MS: u32 = 100;

/// Absolute minimum gravity interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Level a fresh game starts at
pub const STARTING_LEVEL: u32 = 1;

/// Cleared lines required per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cleared row, multiplied by the row count and the current level
pub const POINTS_PER_LINE: u32 = 100;

/// Maximum number of leaderboard entries kept
pub const LEADERBOARD_CAPACITY: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(BASE_DROP_MS, 1000);
        assert_eq!(DROP_STEP_MS, 100);
        assert_eq!(DROP_INTERVAL_MIN_MS, 100);
        assert_eq!(STARTING_LEVEL, 1);
        assert_eq!(LINES_PER_LEVEL, 10);
    }

    #[test]
    fn color_ids_are_distinct_and_non_zero() {
        let mut seen = [false; 8];
        for kind in PieceKind::ALL {
            let id = kind.color() as usize;
            assert!(id >= 1 && id <= 7);
            assert!(!seen[id], "duplicate color id {}", id);
            seen[id] = true;
            assert_eq!(PieceKind::from_color(kind.color()), Some(kind));
        }
        assert_eq!(PieceKind::from_color(0), None);
        assert_eq!(PieceKind::from_color(8), None);
    }
}

/// The seven tetromino piece kinds
///
/// Each kind owns a distinct color id which is what ends up stored in the grid:
/// - **I**: 1, four-wide bar
/// - **J**: 2
/// - **L**: 3
/// - **O**: 4, 2x2 square
/// - **S**: 5
/// - **T**: 6
/// - **Z**: 7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Color id written into the grid for this kind (1..=7)
    pub fn color(&self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Reverse lookup of [`PieceKind::color`]
    pub fn from_color(color: Cell) -> Option<Self> {
        match color {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Player intents accepted by the playfield engine
///
/// Every intent is a single discrete event. Key-hold repeats are filtered
/// before they get here, except for the two drop intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one row (locks if it cannot)
    SoftDrop,
    /// Drop piece as far as it goes and lock it
    HardDrop,
    /// Rotate piece 90° clockwise with wall kicks
    Rotate,
}

impl GameAction {
    /// Whether held-key repeats of this intent are delivered to the engine
    pub fn repeatable(&self) -> bool {
        matches!(self, GameAction::SoftDrop | GameAction::HardDrop)
    }
}

/// A cell on the playfield or inside a shape matrix
///
/// - `0`: empty / transparent
/// - `1..=7`: color id of the piece kind that filled it
pub type Cell = u8;
