//! Email provider configuration.

use serde::{Deserialize, Serialize};

/// Environment variable consulted when no API key is configured.
pub const RESEND_API_KEY_ENV: &str = "RESEND_API_KEY";

/// Transactional email provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Provider: `"resend"` or `"memory"` (records messages, sends nothing).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Provider API key. Empty means "read `RESEND_API_KEY`".
    #[serde(default)]
    pub api_key: String,
    /// Sender identity, `Name <address>`.
    #[serde(default = "default_from")]
    pub from: String,
    /// Per-send timeout in seconds, retries included.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl MailConfig {
    /// The API key from configuration, falling back to `RESEND_API_KEY`.
    ///
    /// Returns `None` when neither is set or both are blank.
    pub fn resolved_api_key(&self) -> Option<String> {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.trim().to_string());
        }
        std::env::var(RESEND_API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    /// Copy of this configuration safe to print.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.api_key.is_empty() {
            copy.api_key = "********".to_string();
        }
        copy
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: String::new(),
            from: default_from(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_provider() -> String {
    "resend".to_string()
}

fn default_from() -> String {
    "RockGuard AI <onboarding@resend.dev>".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_key_wins() {
        let config = MailConfig {
            api_key: "  re_configured  ".to_string(),
            ..MailConfig::default()
        };
        assert_eq!(config.resolved_api_key().as_deref(), Some("re_configured"));
    }

    #[test]
    fn test_redacted_hides_key() {
        let config = MailConfig {
            api_key: "re_secret".to_string(),
            ..MailConfig::default()
        };
        let redacted = config.redacted();
        assert_eq!(redacted.api_key, "********");
        assert_eq!(redacted.from, config.from);
    }

    #[test]
    fn test_redacted_leaves_empty_key_empty() {
        assert!(MailConfig::default().redacted().api_key.is_empty());
    }
}
