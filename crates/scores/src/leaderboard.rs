//! Top-ten leaderboard
//!
//! Entries are kept sorted by score, highest first, and capped at
//! [`LEADERBOARD_CAPACITY`]. Equal scores keep insertion order, so a new score
//! that ties an existing one ranks below it. Whenever a saved score ends up
//! at the top (ties included), it is handed to the configured
//! [`ScoreSubmitter`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use tetris_arena_engine::ScoreRecorder;

use crate::error::ScoresError;
use crate::storage::LeaderboardStorage;
use crate::submit::{NoopSubmitter, ScoreSubmitter};
use crate::types::LEADERBOARD_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    pub date: DateTime<Utc>,
}

/// What [`Leaderboard::save_score`] did with a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Zero scores are never recorded
    Ignored,
    Saved {
        /// Zero-based position, `None` if the score did not make the cut
        rank: Option<usize>,
        /// Whether the score was handed to the submitter
        submitted: bool,
    },
}

pub struct Leaderboard<S> {
    storage: S,
    submitter: Box<dyn ScoreSubmitter>,
}

impl<S: LeaderboardStorage> Leaderboard<S> {
    pub fn new(storage: S) -> Self {
        Self::with_submitter(storage, Box::new(NoopSubmitter))
    }

    pub fn with_submitter(storage: S, submitter: Box<dyn ScoreSubmitter>) -> Self {
        Self { storage, submitter }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stored entries, best first
    ///
    /// Unreadable or malformed data yields an empty list.
    pub fn load_top_scores(&self) -> Vec<LeaderboardEntry> {
        let payload = match self.storage.load() {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(%err, "failed to read leaderboard, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<LeaderboardEntry>>(&payload) {
            Ok(mut entries) => {
                rank_entries(&mut entries);
                entries
            }
            Err(err) => {
                warn!(%err, "malformed leaderboard data, starting empty");
                Vec::new()
            }
        }
    }

    /// The best `n` entries
    pub fn top(&self, n: usize) -> Vec<LeaderboardEntry> {
        let mut entries = self.load_top_scores();
        entries.truncate(n);
        entries
    }

    /// Record `score` with the current time
    pub fn save_score(&mut self, score: u32) -> Result<SaveOutcome, ScoresError> {
        self.save_score_at(score, Utc::now())
    }

    pub fn save_score_at(
        &mut self,
        score: u32,
        date: DateTime<Utc>,
    ) -> Result<SaveOutcome, ScoresError> {
        if score == 0 {
            return Ok(SaveOutcome::Ignored);
        }

        let mut entries = self.load_top_scores();
        entries.push(LeaderboardEntry { score, date });
        rank_entries(&mut entries);

        let payload = serde_json::to_string_pretty(&entries)?;
        self.storage.store(&payload)?;

        let rank = entries
            .iter()
            .rposition(|entry| entry.score == score && entry.date == date);
        let submitted = entries.first().is_some_and(|top| top.score == score);
        if submitted {
            self.submitter.submit(score);
        }

        Ok(SaveOutcome::Saved { rank, submitted })
    }
}

impl<S: LeaderboardStorage> ScoreRecorder for Leaderboard<S> {
    fn record_final_score(&mut self, score: u32) {
        match self.save_score(score) {
            Ok(SaveOutcome::Saved { rank, submitted }) => {
                info!(score, ?rank, submitted, "score saved")
            }
            Ok(SaveOutcome::Ignored) => debug!("zero score not saved"),
            Err(err) => warn!(%err, score, "failed to save score"),
        }
    }
}

/// Sort best first (stable) and drop everything past the capacity
fn rank_entries(entries: &mut Vec<LeaderboardEntry>) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(LEADERBOARD_CAPACITY);
}
