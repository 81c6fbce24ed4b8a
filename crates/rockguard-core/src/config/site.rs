//! Monitored site defaults used when an advisory is opened without details.

use serde::{Deserialize, Serialize};

/// Location and threat assessment shown in evacuation advisories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// City of the monitored site.
    #[serde(default = "default_city")]
    pub city: String,
    /// State or region of the monitored site.
    #[serde(default = "default_state")]
    pub state: String,
    /// Threat classification label.
    #[serde(default = "default_threat")]
    pub threat: String,
    /// Model confidence as displayed (e.g. `"94.7%"`).
    #[serde(default = "default_confidence")]
    pub confidence: String,
    /// Affected zones, free text.
    #[serde(default = "default_affected_zones")]
    pub affected_zones: String,
    /// Personnel at risk, free text.
    #[serde(default = "default_personnel_at_risk")]
    pub personnel_at_risk: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            state: default_state(),
            threat: default_threat(),
            confidence: default_confidence(),
            affected_zones: default_affected_zones(),
            personnel_at_risk: default_personnel_at_risk(),
        }
    }
}

fn default_city() -> String {
    "Shimla".to_string()
}

fn default_state() -> String {
    "Himachal Pradesh".to_string()
}

fn default_threat() -> String {
    "ROCKFALL - GRADE IV".to_string()
}

fn default_confidence() -> String {
    "94.7%".to_string()
}

fn default_affected_zones() -> String {
    "North Wall, Crest Zone".to_string()
}

fn default_personnel_at_risk() -> String {
    "12 WORKERS".to_string()
}
