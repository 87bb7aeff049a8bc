//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the playfield rules and state. It has **no dependencies**
//! on rendering, timing, input or I/O, making it:
//!
//! - **Deterministic**: the piece source is injected, so a seed reproduces a game
//! - **Testable**: every rule is a plain method on plain data
//! - **Portable**: the caller decides what drives [`GameState::tick`]
//!
//! # Module Structure
//!
//! - [`grid`]: 12x24 occupancy matrix with bounds rules and row sweeping
//! - [`pieces`]: the seven tetromino templates and the active piece
//! - [`collision`]: the single placement predicate
//! - [`rotation`]: clockwise rotation with the horizontal kick search
//! - [`rng`]: seeded uniform piece selection behind the [`PieceSource`] trait
//! - [`scoring`]: line points, level-ups and the gravity interval
//! - [`game_state`]: the engine tying it all together
//! - [`snapshot`]: owned copies of the state for renderers
//!
//! # Game Rules
//!
//! - **Random pieces**: uniform, independent draws (no bag)
//! - **Rotation**: clockwise only; a blocked rotation is kicked sideways
//!   `+1, -1, +2, -2, ...` within the shape width
//! - **No lock delay**: a piece locks the moment it cannot move down
//! - **Scoring**: `rows * 100 * level` per lock
//! - **Levels**: one level per `level * 10` total lines, gravity 100ms faster
//!   each time down to 100ms
//!
//! # Example
//!
//! ```
//! use tetris_arena_core::GameState;
//! use tetris_arena_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // One piece locked, nothing cleared yet.
//! assert_eq!(game.grid().filled_count(), 4);
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) with the milliseconds
//! elapsed since the previous call. The piece drops one row each time the
//! accumulated time exceeds [`GameState::drop_interval_ms`].

pub mod collision;
pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use tetris_arena_types as types;

// Re-export commonly used types for convenience
pub use collision::collides;
pub use game_state::{GameEvent, GameState, Phase};
pub use grid::Grid;
pub use pieces::{get_shape, Piece, Shape};
pub use rng::{PieceSource, SequenceSource, SimpleRng, UniformSource};
pub use rotation::{rotate_clockwise, try_rotate};
pub use scoring::{calculate_line_score, ClearResult, Progress};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
