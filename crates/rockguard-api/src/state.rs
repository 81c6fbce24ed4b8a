//! Application state shared across all handlers and middleware.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use tokio::sync::Mutex;

use rockguard_alert::{AlertFeed, EvacuationAdvisory, NotificationDispatcher};
use rockguard_core::config::AppConfig;
use rockguard_core::result::AppResult;
use rockguard_core::traits::MailTransport;

/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Alerting ─────────────────────────────────────────────
    /// One-shot sends and the broadcast loop share this dispatcher
    pub dispatcher: Arc<NotificationDispatcher>,
    /// The site's single evacuation advisory; operator commands are serialized
    pub advisory: Arc<Mutex<EvacuationAdvisory>>,
    /// Prediction alert history
    pub feed: Arc<RwLock<AlertFeed>>,

    pub started_at: Instant,
}

impl AppState {
    /// Wire the alerting components around `transport`.
    pub fn new(
        config: AppConfig,
        transport: Arc<dyn MailTransport>,
        feed: AlertFeed,
    ) -> AppResult<Self> {
        let dispatcher = Arc::new(NotificationDispatcher::new(
            transport,
            config.mail.from.clone(),
            config.broadcast.interval(),
        )?);
        let advisory = EvacuationAdvisory::new(Arc::clone(&dispatcher), config.broadcast.clone());

        Ok(Self {
            config: Arc::new(config),
            dispatcher,
            advisory: Arc::new(Mutex::new(advisory)),
            feed: Arc::new(RwLock::new(feed)),
            started_at: Instant::now(),
        })
    }
}
