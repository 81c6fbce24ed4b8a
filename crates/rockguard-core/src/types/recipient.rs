//! Validated email recipient.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An email address accepted for evacuation alerts.
///
/// The check is deliberately loose: the value is trimmed, must be
/// non-empty and must contain an `@`. Deliverability is the provider's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Recipient(String);

impl Recipient {
    /// Parse a candidate address, returning `None` when it is rejected.
    pub fn parse(candidate: &str) -> Option<Self> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() || !trimmed.contains('@') {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the recipient, returning the address.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Recipient {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Recipient {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid email address: '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let r = Recipient::parse("  ops@example.com \n").expect("should parse");
        assert_eq!(r.as_str(), "ops@example.com");
    }

    #[test]
    fn test_parse_rejects_blank_and_missing_at() {
        assert!(Recipient::parse("").is_none());
        assert!(Recipient::parse("   ").is_none());
        assert!(Recipient::parse("ops.example.com").is_none());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Recipient = serde_json::from_str("\" a@b \"").expect("valid");
        assert_eq!(ok.as_str(), "a@b");
        assert!(serde_json::from_str::<Recipient>("\"nobody\"").is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let r = Recipient::parse("ops@example.com").expect("should parse");
        assert_eq!(
            serde_json::to_string(&r).expect("serialize"),
            "\"ops@example.com\""
        );
    }
}
