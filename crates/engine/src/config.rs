use std::env;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::FRAME_MS;

/// Game loop settings
///
/// - `TETRIS_SEED`: piece sequence seed (default: derived from the clock)
/// - `TETRIS_FRAME_MS`: scheduler frame interval (default: 16)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    pub seed: u32,
    pub frame_ms: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            frame_ms: FRAME_MS,
        }
    }
}

impl LoopConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or unparsable values fall
    /// back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let frame_ms = lookup("TETRIS_FRAME_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(FRAME_MS);

        Self { seed, frame_ms }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms as u64)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
