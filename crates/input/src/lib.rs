//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`Command`]s: player intents plus the
//! restart and quit controls. Key-hold repeats are filtered here so the
//! engine sees one intent per press, except for the drop intents.

pub mod map;

pub use tetris_arena_types as types;

pub use map::{handle_key_event, map_key, should_quit, Command};
