//! # rockguard-alert
//!
//! The evacuation alert workflow:
//!
//! - [`registry`]: deduplicated, ordered recipient set
//! - [`payload`] and [`formatter`]: alert content and email rendering
//! - [`dispatcher`]: one send through the configured mail transport
//! - [`scheduler`]: the repeating broadcast loop
//! - [`countdown`]: the evacuation window clock
//! - [`session`]: the advisory lifecycle tying the above together
//! - [`feed`]: alert history that raises the advisory

pub mod countdown;
pub mod dispatcher;
pub mod feed;
pub mod formatter;
pub mod payload;
pub mod registry;
pub mod scheduler;
pub mod session;

pub use dispatcher::{DispatchResult, NotificationDispatcher};
pub use feed::AlertFeed;
pub use payload::{AlertDetails, AlertPayload, Location};
pub use registry::RecipientRegistry;
pub use scheduler::{BroadcastScheduler, BroadcastStats};
pub use session::{AdvisoryState, EvacuationAdvisory, SessionSnapshot};
