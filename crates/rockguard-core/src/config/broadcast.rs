//! Evacuation broadcast timing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cadence of the resend loop and length of the evacuation window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastConfig {
    /// Seconds between dispatch ticks while a broadcast is active.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
    /// Starting value of the evacuation countdown in seconds.
    #[serde(default = "default_countdown")]
    pub countdown_seconds: u32,
}

impl BroadcastConfig {
    /// Dispatch interval as a [`Duration`]. Never zero.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.max(1))
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval(),
            countdown_seconds: default_countdown(),
        }
    }
}

fn default_interval() -> u64 {
    15
}

fn default_countdown() -> u32 {
    120
}
