//! Terminal frontend.
//!
//! Renders game snapshots into a plain framebuffer (two columns per grid
//! cell) and flushes it to the terminal with crossterm, rewriting only the
//! cells that changed since the previous frame.

pub mod fb;
pub mod frontend;
pub mod game_view;
pub mod renderer;

pub use tetris_arena_core as core;
pub use tetris_arena_engine as engine;
pub use tetris_arena_scores as scores;
pub use tetris_arena_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use frontend::TerminalFrontend;
pub use game_view::{kind_color, GameView, Viewport, LEADERBOARD_ROWS};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
