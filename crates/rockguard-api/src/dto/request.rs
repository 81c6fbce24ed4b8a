//! Request DTOs.

use serde::{Deserialize, Serialize};

use rockguard_alert::{AlertDetails, Location};
use rockguard_core::config::SiteConfig;
use rockguard_core::types::Recipient;

/// `POST /api/send-evacuation-alert` body.
///
/// Addresses are validated while deserializing; the `emails` presence
/// check happens first, in the handler.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAlertRequest {
    pub emails: Vec<Recipient>,
    pub location: Location,
    pub alert_details: AlertAssessment,
}

/// Threat assessment block of [`SendAlertRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertAssessment {
    pub confidence: String,
    pub threat: String,
    pub affected_zones: String,
    pub personnel_at_risk: String,
}

impl SendAlertRequest {
    pub fn into_parts(self) -> (Vec<Recipient>, AlertDetails) {
        let details = AlertDetails {
            location: self.location,
            threat: self.alert_details.threat,
            confidence: self.alert_details.confidence,
            affected_zones: self.alert_details.affected_zones,
            personnel_at_risk: self.alert_details.personnel_at_risk,
        };
        (self.emails, details)
    }
}

/// `POST /api/evacuation/open` body. Omitted fields come from the site configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAdvisoryRequest {
    pub city: Option<String>,
    pub state: Option<String>,
    pub threat: Option<String>,
    pub confidence: Option<String>,
    pub affected_zones: Option<String>,
    pub personnel_at_risk: Option<String>,
}

impl OpenAdvisoryRequest {
    pub fn resolve(self, site: &SiteConfig) -> AlertDetails {
        let mut details = AlertDetails::from(site);
        if let Some(city) = self.city {
            details.location.city = city;
        }
        if let Some(state) = self.state {
            details.location.state = state;
        }
        if let Some(threat) = self.threat {
            details.threat = threat;
        }
        if let Some(confidence) = self.confidence {
            details.confidence = confidence;
        }
        if let Some(zones) = self.affected_zones {
            details.affected_zones = zones;
        }
        if let Some(personnel) = self.personnel_at_risk {
            details.personnel_at_risk = personnel;
        }
        details
    }
}

/// `POST /api/evacuation/recipients` body.
#[derive(Debug, Clone, Deserialize)]
pub struct AddRecipientRequest {
    pub email: String,
}
