//! Evacuation advisory lifecycle.
//!
//! ```text
//! Closed --open--> Reviewing --start_broadcast--> Broadcasting --mute--> Muted
//!                      ^                              |                    |
//!                      +-------stop_broadcast---------+--------------------+
//! any open state --close--> Closed
//! ```
//!
//! Muting silences the operator-facing siren only; emails keep flowing
//! until the broadcast is stopped or the advisory is closed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rockguard_core::config::BroadcastConfig;
use rockguard_core::error::AppError;
use rockguard_core::result::AppResult;
use rockguard_core::types::Recipient;

use crate::countdown::EvacuationCountdown;
use crate::dispatcher::{DispatchResult, NotificationDispatcher};
use crate::payload::AlertDetails;
use crate::registry::RecipientRegistry;
use crate::scheduler::BroadcastScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryState {
    Closed,
    Reviewing,
    Broadcasting,
    Muted,
}

#[derive(Debug)]
struct OpenAdvisory {
    details: AlertDetails,
    registry: RecipientRegistry,
    scheduler: BroadcastScheduler,
    countdown: EvacuationCountdown,
    muted: bool,
    opened_at: DateTime<Utc>,
}

impl OpenAdvisory {
    fn state(&self) -> AdvisoryState {
        match (self.scheduler.is_active(), self.muted) {
            (false, _) => AdvisoryState::Reviewing,
            (true, false) => AdvisoryState::Broadcasting,
            (true, true) => AdvisoryState::Muted,
        }
    }
}

/// Point-in-time view of the advisory, for the control surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: AdvisoryState,
    pub details: Option<AlertDetails>,
    pub recipients: Vec<Recipient>,
    pub countdown_seconds: u32,
    pub emails_sent_count: u64,
    pub last_sent_at: Option<DateTime<Utc>>,
    pub last_result: Option<DispatchResult>,
    pub siren_active: bool,
    pub opened_at: Option<DateTime<Utc>>,
}

/// The site's evacuation advisory. At most one session is open at a time;
/// closing it discards its recipients, counters and timers.
#[derive(Debug)]
pub struct EvacuationAdvisory {
    dispatcher: Arc<NotificationDispatcher>,
    config: BroadcastConfig,
    session: Option<OpenAdvisory>,
}

impl EvacuationAdvisory {
    pub fn new(dispatcher: Arc<NotificationDispatcher>, config: BroadcastConfig) -> Self {
        Self {
            dispatcher,
            config,
            session: None,
        }
    }

    pub fn state(&self) -> AdvisoryState {
        self.session
            .as_ref()
            .map_or(AdvisoryState::Closed, OpenAdvisory::state)
    }

    /// Open a session for `details` and start the evacuation countdown.
    pub fn open(&mut self, details: AlertDetails) -> AppResult<()> {
        if self.session.is_some() {
            return Err(AppError::conflict("An evacuation advisory is already open"));
        }

        tracing::warn!(
            city = %details.location.city,
            state = %details.location.state,
            threat = %details.threat,
            "Evacuation advisory opened"
        );

        self.session = Some(OpenAdvisory {
            details,
            registry: RecipientRegistry::new(),
            scheduler: BroadcastScheduler::new(
                Arc::clone(&self.dispatcher),
                self.config.interval(),
            ),
            countdown: EvacuationCountdown::start(self.config.countdown_seconds),
            muted: false,
            opened_at: Utc::now(),
        });
        Ok(())
    }

    /// Add a recipient to the open session. `Ok(false)` means invalid or duplicate.
    pub fn add_recipient(&mut self, candidate: &str) -> AppResult<bool> {
        Ok(self.open_session()?.registry.add(candidate))
    }

    /// Remove a recipient from the open session. `Ok(false)` means absent.
    ///
    /// An active broadcast keeps the recipient list it started with.
    pub fn remove_recipient(&mut self, address: &str) -> AppResult<bool> {
        Ok(self.open_session()?.registry.remove(address))
    }

    pub fn recipients(&self) -> Vec<Recipient> {
        self.session
            .as_ref()
            .map(|s| s.registry.list().to_vec())
            .unwrap_or_default()
    }

    /// Begin emailing the current recipients. Only valid while reviewing
    /// with at least one recipient; otherwise returns `false`.
    pub fn start_broadcast(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.state() != AdvisoryState::Reviewing {
            return false;
        }

        let recipients = session.registry.list().to_vec();
        session.muted = false;
        session.scheduler.start(recipients, session.details.clone())
    }

    /// Stop emailing and return to reviewing. Returns `false` if not broadcasting.
    pub fn stop_broadcast(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.muted = false;
        session.scheduler.stop()
    }

    /// Silence the siren. Emails continue. Returns `false` unless broadcasting.
    pub fn mute(&mut self) -> bool {
        match self.session.as_mut() {
            Some(session) if session.state() == AdvisoryState::Broadcasting => {
                session.muted = true;
                tracing::info!("Evacuation siren muted");
                true
            }
            _ => false,
        }
    }

    /// Close the advisory, stopping the broadcast and the countdown.
    /// Returns `false` if nothing was open.
    pub fn close(&mut self) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };
        session.scheduler.stop();
        session.countdown.cancel();

        let stats = session.scheduler.stats();
        tracing::info!(
            emails_sent = stats.emails_sent_count,
            "Evacuation advisory closed"
        );
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let Some(session) = self.session.as_ref() else {
            return SessionSnapshot {
                state: AdvisoryState::Closed,
                details: None,
                recipients: Vec::new(),
                countdown_seconds: 0,
                emails_sent_count: 0,
                last_sent_at: None,
                last_result: None,
                siren_active: false,
                opened_at: None,
            };
        };

        let state = session.state();
        let stats = session.scheduler.stats();
        SessionSnapshot {
            state,
            details: Some(session.details.clone()),
            recipients: session.registry.list().to_vec(),
            countdown_seconds: session.countdown.remaining(),
            emails_sent_count: stats.emails_sent_count,
            last_sent_at: stats.last_sent_at,
            last_result: stats.last_result,
            siren_active: state == AdvisoryState::Broadcasting,
            opened_at: Some(session.opened_at),
        }
    }

    fn open_session(&mut self) -> AppResult<&mut OpenAdvisory> {
        self.session
            .as_mut()
            .ok_or_else(|| AppError::conflict("No evacuation advisory is open"))
    }
}
