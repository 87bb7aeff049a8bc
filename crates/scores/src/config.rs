use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::leaderboard::Leaderboard;
use crate::storage::FileStorage;
use crate::submit::{HttpSubmitter, NoopSubmitter, ScoreSubmitter};

const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 5_000;

/// Leaderboard and submission settings
///
/// - `TETRIS_LEADERBOARD_PATH`: leaderboard file (default under the user data dir)
/// - `TETRIS_SCORE_URL`: endpoint for top scores (unset disables submission)
/// - `TETRIS_SUBMIT_TIMEOUT_MS`: per-request timeout (default: 5000)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoresConfig {
    pub leaderboard_path: PathBuf,
    pub submit_url: Option<String>,
    pub submit_timeout: Duration,
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            leaderboard_path: default_leaderboard_path(),
            submit_url: None,
            submit_timeout: Duration::from_millis(DEFAULT_SUBMIT_TIMEOUT_MS),
        }
    }
}

impl ScoresConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let leaderboard_path = non_empty("TETRIS_LEADERBOARD_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_leaderboard_path);

        let submit_url = non_empty("TETRIS_SCORE_URL");

        let submit_timeout = non_empty("TETRIS_SUBMIT_TIMEOUT_MS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_SUBMIT_TIMEOUT_MS));

        Self {
            leaderboard_path,
            submit_url,
            submit_timeout,
        }
    }

    /// HTTP submitter for the configured URL, or a no-op one
    pub fn submitter(&self) -> Box<dyn ScoreSubmitter> {
        let Some(url) = &self.submit_url else {
            return Box::new(NoopSubmitter);
        };

        match HttpSubmitter::new(url.clone(), self.submit_timeout) {
            Ok(submitter) => Box::new(submitter),
            Err(err) => {
                warn!(%err, %url, "score submission disabled");
                Box::new(NoopSubmitter)
            }
        }
    }

    pub fn open_leaderboard(&self) -> Leaderboard<FileStorage> {
        Leaderboard::with_submitter(
            FileStorage::new(&self.leaderboard_path),
            self.submitter(),
        )
    }
}

/// `<data dir>/tetris-arena/leaderboard.json`, relative to the working
/// directory when the platform has no data dir
pub fn default_leaderboard_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tetris-arena")
        .join("leaderboard.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> ScoresConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ScoresConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.leaderboard_path, default_leaderboard_path());
        assert!(config.leaderboard_path.ends_with("tetris-arena/leaderboard.json"));
        assert_eq!(config.submit_url, None);
        assert_eq!(config.submit_timeout, Duration::from_millis(5_000));
    }

    #[test]
    fn test_reads_values() {
        let config = config(&[
            ("TETRIS_LEADERBOARD_PATH", "/tmp/board.json"),
            ("TETRIS_SCORE_URL", " http://localhost:3000/api/scores "),
            ("TETRIS_SUBMIT_TIMEOUT_MS", "750"),
        ]);
        assert_eq!(config.leaderboard_path, PathBuf::from("/tmp/board.json"));
        assert_eq!(
            config.submit_url.as_deref(),
            Some("http://localhost:3000/api/scores")
        );
        assert_eq!(config.submit_timeout, Duration::from_millis(750));
    }

    #[test]
    fn test_blank_and_invalid_values_use_defaults() {
        let config = config(&[
            ("TETRIS_LEADERBOARD_PATH", "  "),
            ("TETRIS_SCORE_URL", ""),
            ("TETRIS_SUBMIT_TIMEOUT_MS", "soon"),
        ]);
        assert_eq!(config.leaderboard_path, default_leaderboard_path());
        assert_eq!(config.submit_url, None);
        assert_eq!(config.submit_timeout, Duration::from_millis(5_000));
    }

    #[test]
    fn test_open_leaderboard_uses_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lb.json");
        let config = ScoresConfig {
            leaderboard_path: path.clone(),
            ..ScoresConfig::default()
        };
        let mut board = config.open_leaderboard();
        board.save_score(10).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_from_env() {
        // Just ensure it doesn't panic.
        let _config = ScoresConfig::from_env();
    }
}
