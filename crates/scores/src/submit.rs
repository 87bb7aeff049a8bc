//! Best-effort remote score submission
//!
//! A submission is fired and forgotten: failures are logged and dropped, and
//! nothing is ever retried or reported back to the game.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, warn};

use crate::error::ScoresError;

/// Sends a new top score somewhere
pub trait ScoreSubmitter: Send {
    fn submit(&self, score: u32);
}

/// Submitter used when no endpoint is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSubmitter;

impl ScoreSubmitter for NoopSubmitter {
    fn submit(&self, _score: u32) {}
}

#[derive(Debug, Serialize)]
struct ScorePayload {
    score: u32,
}

/// POST `{"score": n}` to `url`
///
/// Any non-2xx status is an error.
pub async fn post_score(client: &Client, url: &str, score: u32) -> Result<(), ScoresError> {
    let response = client.post(url).json(&ScorePayload { score }).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScoresError::Http {
            status: status.as_u16(),
        });
    }

    Ok(())
}

/// Posts scores over HTTP from a private background runtime
///
/// Requests still in flight when the submitter is dropped are abandoned.
pub struct HttpSubmitter {
    runtime: Option<Runtime>,
    client: Client,
    url: String,
}

impl HttpSubmitter {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ScoresError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::from_client(url, client)
    }

    pub fn from_client(url: impl Into<String>, client: Client) -> Result<Self, ScoresError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("score-submit")
            .enable_all()
            .build()?;

        Ok(Self {
            runtime: Some(runtime),
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ScoreSubmitter for HttpSubmitter {
    fn submit(&self, score: u32) {
        let Some(runtime) = &self.runtime else {
            return;
        };

        let client = self.client.clone();
        let url = self.url.clone();
        runtime.spawn(async move {
            match post_score(&client, &url, score).await {
                Ok(()) => debug!(score, %url, "score submitted"),
                Err(err) => warn!(%err, score, %url, "score submission failed"),
            }
        });
    }
}

impl Drop for HttpSubmitter {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
