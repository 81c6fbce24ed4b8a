//! Recipient registry for one evacuation session.

use rockguard_core::types::Recipient;

/// Ordered, deduplicated set of alert recipients.
///
/// Invalid and duplicate submissions are dropped silently. The boolean
/// returned by [`add`](Self::add) and [`remove`](Self::remove) tells the
/// caller whether the registry changed.
#[derive(Debug, Clone, Default)]
pub struct RecipientRegistry {
    recipients: Vec<Recipient>,
}

impl RecipientRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate address. Returns `true` if it was appended.
    pub fn add(&mut self, candidate: &str) -> bool {
        let Some(recipient) = Recipient::parse(candidate) else {
            tracing::debug!("Rejected invalid recipient");
            return false;
        };

        if self.recipients.contains(&recipient) {
            return false;
        }

        self.recipients.push(recipient);
        true
    }

    /// Remove every entry equal to `address`. Returns `true` if any was removed.
    pub fn remove(&mut self, address: &str) -> bool {
        let address = address.trim();
        let before = self.recipients.len();
        self.recipients.retain(|r| r.as_str() != address);
        self.recipients.len() != before
    }

    /// Recipients in insertion order.
    pub fn list(&self) -> &[Recipient] {
        &self.recipients
    }

    /// Number of recipients.
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}
