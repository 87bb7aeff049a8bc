use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoresError {
    #[error("leaderboard io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("score submission rejected with status {status}")]
    Http { status: u16 },
    #[error("score submission failed: {0}")]
    Transport(#[from] reqwest::Error),
}
