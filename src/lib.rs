//! Tetris Arena (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `tetris_arena::{core,engine,input,scores,term,types}` and adds the
//! [`session`] glue the binary runs.

pub use tetris_arena_core as core;
pub use tetris_arena_engine as engine;
pub use tetris_arena_input as input;
pub use tetris_arena_scores as scores;
pub use tetris_arena_term as term;
pub use tetris_arena_types as types;

pub mod session;

pub use session::Session;
