//! Evacuation window countdown.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Seconds remaining in the evacuation window.
///
/// Decrements once per second until it reaches zero, then stays there.
/// It runs independently of the broadcast: expiry never stops emails.
#[derive(Debug)]
pub struct EvacuationCountdown {
    remaining: Arc<AtomicU32>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl EvacuationCountdown {
    /// Start counting down from `seconds`. Must be called within a Tokio runtime.
    pub fn start(seconds: u32) -> Self {
        let remaining = Arc::new(AtomicU32::new(seconds));
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(tick_down(Arc::clone(&remaining), cancel.clone()));

        Self {
            remaining,
            cancel,
            handle,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::SeqCst)
    }

    pub fn is_expired(&self) -> bool {
        self.remaining() == 0
    }

    /// Freeze the countdown at its current value.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EvacuationCountdown {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.handle.abort();
    }
}

async fn tick_down(remaining: Arc<AtomicU32>, cancel: CancellationToken) {
    let mut ticker = time::interval_at(Instant::now() + ONE_SECOND, ONE_SECOND);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {}
        }

        let previous = remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                Some(v.saturating_sub(1))
            })
            .unwrap_or_else(|v| v);

        if previous <= 1 {
            tracing::info!("Evacuation countdown expired");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_once_per_second() {
        let countdown = EvacuationCountdown::start(120);
        assert_eq!(countdown.remaining(), 120);

        time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(countdown.remaining(), 110);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_at_zero() {
        let countdown = EvacuationCountdown::start(3);
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(countdown.remaining(), 0);
        assert!(countdown.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_start_stays_zero() {
        let countdown = EvacuationCountdown::start(0);
        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(countdown.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_freezes_value() {
        let countdown = EvacuationCountdown::start(60);
        time::sleep(Duration::from_millis(5_500)).await;
        countdown.cancel();
        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(countdown.remaining(), 55);
    }
}
