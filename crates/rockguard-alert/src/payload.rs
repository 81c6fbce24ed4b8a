//! Alert content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rockguard_core::config::SiteConfig;

/// Where the threat is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
}

/// The assessment an advisory is raised for, without an issue time.
///
/// This is the template each broadcast tick stamps into a fresh
/// [`AlertPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDetails {
    pub location: Location,
    pub threat: String,
    pub confidence: String,
    pub affected_zones: String,
    pub personnel_at_risk: String,
}

impl AlertDetails {
    /// Issue a payload stamped with the current time.
    pub fn issue(&self) -> AlertPayload {
        self.issue_at(Utc::now())
    }

    /// Issue a payload stamped with `issued_at`.
    pub fn issue_at(&self, issued_at: DateTime<Utc>) -> AlertPayload {
        AlertPayload {
            details: self.clone(),
            issued_at,
        }
    }
}

impl From<&SiteConfig> for AlertDetails {
    fn from(site: &SiteConfig) -> Self {
        Self {
            location: Location {
                city: site.city.clone(),
                state: site.state.clone(),
            },
            threat: site.threat.clone(),
            confidence: site.confidence.clone(),
            affected_zones: site.affected_zones.clone(),
            personnel_at_risk: site.personnel_at_risk.clone(),
        }
    }
}

/// An issued alert. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPayload {
    #[serde(flatten)]
    details: AlertDetails,
    issued_at: DateTime<Utc>,
}

impl AlertPayload {
    pub fn details(&self) -> &AlertDetails {
        &self.details
    }

    pub fn location(&self) -> &Location {
        &self.details.location
    }

    pub fn threat(&self) -> &str {
        &self.details.threat
    }

    pub fn confidence(&self) -> &str {
        &self.details.confidence
    }

    pub fn affected_zones(&self) -> &str {
        &self.details.affected_zones
    }

    pub fn personnel_at_risk(&self) -> &str {
        &self.details.personnel_at_risk
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}
