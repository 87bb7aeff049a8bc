//! Score persistence and submission
//!
//! - [`Leaderboard`]: top-ten list over a pluggable [`LeaderboardStorage`]
//! - [`HttpSubmitter`]: fire-and-forget POST of new top scores
//! - [`ScoresConfig`]: environment-driven wiring of the two
//!
//! `Leaderboard` implements the engine's [`ScoreRecorder`](tetris_arena_engine::ScoreRecorder),
//! so it can be handed straight to the game loop.

pub mod config;
pub mod error;
pub mod leaderboard;
pub mod storage;
pub mod submit;

pub use tetris_arena_types as types;

pub use config::{default_leaderboard_path, ScoresConfig};
pub use error::ScoresError;
pub use leaderboard::{Leaderboard, LeaderboardEntry, SaveOutcome};
pub use storage::{FileStorage, LeaderboardStorage, MemoryStorage};
pub use submit::{post_score, HttpSubmitter, NoopSubmitter, ScoreSubmitter};
