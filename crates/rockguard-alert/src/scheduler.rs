//! Repeating evacuation broadcast.
//!
//! While active, a background task dispatches a freshly stamped alert to
//! the recipient snapshot taken at start: once immediately, then every
//! interval. Dispatches never overlap, including across a stop and a quick
//! restart. Ticks that come due during a slow send collapse into one tick
//! fired when the send finishes. After [`BroadcastScheduler::stop`] no new
//! dispatch starts, and a send already in flight has its outcome dropped.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use rockguard_core::types::Recipient;

use crate::dispatcher::{DispatchResult, NotificationDispatcher};
use crate::payload::AlertDetails;

/// Counters accumulated over a session's broadcasts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastStats {
    /// Successful dispatches only.
    pub emails_sent_count: u64,
    /// Tick time of the most recent successful dispatch.
    pub last_sent_at: Option<DateTime<Utc>>,
    /// Outcome of the most recent dispatch, successful or not.
    pub last_result: Option<DispatchResult>,
}

impl BroadcastStats {
    fn record(&mut self, result: DispatchResult, at: DateTime<Utc>) {
        if result.is_delivered() {
            self.emails_sent_count += 1;
            self.last_sent_at = Some(at);
        }
        self.last_result = Some(result);
    }
}

#[derive(Debug)]
struct ActiveBroadcast {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Drives periodic dispatches for one advisory session.
#[derive(Debug)]
pub struct BroadcastScheduler {
    dispatcher: Arc<NotificationDispatcher>,
    interval: Duration,
    stats: Arc<Mutex<BroadcastStats>>,
    /// Held for the duration of each send, by whichever task is sending.
    in_flight: Arc<AsyncMutex<()>>,
    active: Option<ActiveBroadcast>,
}

impl BroadcastScheduler {
    pub fn new(dispatcher: Arc<NotificationDispatcher>, interval: Duration) -> Self {
        Self {
            dispatcher,
            interval,
            stats: Arc::new(Mutex::new(BroadcastStats::default())),
            in_flight: Arc::new(AsyncMutex::new(())),
            active: None,
        }
    }

    /// Begin broadcasting `details` to `recipients`.
    ///
    /// Returns `false` without doing anything when already active or when
    /// `recipients` is empty. Must be called within a Tokio runtime.
    pub fn start(&mut self, recipients: Vec<Recipient>, details: AlertDetails) -> bool {
        if self.active.is_some() {
            tracing::debug!("Broadcast already active");
            return false;
        }
        if recipients.is_empty() {
            tracing::warn!("Refusing to start broadcast with no recipients");
            return false;
        }

        tracing::info!(
            recipients = recipients.len(),
            interval_secs = self.interval.as_secs(),
            "Evacuation broadcast started"
        );

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_broadcast(
            Arc::clone(&self.dispatcher),
            recipients,
            details,
            self.interval,
            Arc::clone(&self.stats),
            Arc::clone(&self.in_flight),
            cancel.clone(),
        ));

        self.active = Some(ActiveBroadcast { cancel, handle });
        true
    }

    /// Stop broadcasting. Returns `false` if nothing was active.
    pub fn stop(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        // Cancel under the stats lock so a finishing send cannot record after this.
        {
            let _stats = self.stats.lock().unwrap_or_else(|e| e.into_inner());
            active.cancel.cancel();
        }
        tracing::info!("Evacuation broadcast stopped");
        true
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Copy of the current counters.
    pub fn stats(&self) -> BroadcastStats {
        self.stats.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Drop for BroadcastScheduler {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
            active.handle.abort();
        }
    }
}

async fn run_broadcast(
    dispatcher: Arc<NotificationDispatcher>,
    recipients: Vec<Recipient>,
    details: AlertDetails,
    period: Duration,
    stats: Arc<Mutex<BroadcastStats>>,
    in_flight: Arc<AsyncMutex<()>>,
    cancel: CancellationToken,
) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let payload = details.issue();

        // A send from before a restart may still be running.
        let _sending = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            guard = in_flight.lock() => guard,
        };

        let result = dispatcher.send(&recipients, &payload).await;

        {
            let mut stats = stats.lock().unwrap_or_else(|e| e.into_inner());
            if cancel.is_cancelled() {
                tracing::debug!("Discarding dispatch outcome after broadcast stop");
                break;
            }
            stats.record(result, payload.issued_at());
        }
    }

    tracing::debug!("Broadcast task exited");
}
