//! Evacuation email rendering.
//!
//! Subject and bodies are handlebars templates rendered over the issued
//! [`AlertPayload`]. The HTML template relies on handlebars' default
//! escaping for caller-supplied values; the subject and text templates
//! use triple-stash since they are not HTML.

use std::fmt;
use std::time::Duration;

use handlebars::Handlebars;
use serde::Serialize;

use rockguard_core::error::{AppError, ErrorKind};
use rockguard_core::result::AppResult;

use crate::payload::AlertPayload;

/// Ordered evacuation steps: `(instruction, detail)`.
pub const EVACUATION_PROTOCOL: [(&str, &str); 5] = [
    ("STOP ALL WORK IMMEDIATELY", "Secure equipment and materials"),
    ("MOVE TO SAFE ZONE", "Follow designated evacuation routes"),
    ("REPORT TO ASSEMBLY POINT", "Account for all personnel"),
    ("DO NOT RETURN", "Wait for all-clear from safety coordinator"),
    ("STAY ALERT", "Monitor communications for updates"),
];

const PRODUCT_LINE: &str = "ROCKGUARD AI - ROCKFALL PREDICTION SYSTEM";
const FOOTER_VERSION: &str = "ROCKGUARD AI v4.2.1 | ROCKFALL PREDICTION SYSTEM";
const EMERGENCY_CONTACT: &str = "+1-800-ROCKFALL | emergency@rockguard.ai";

const STYLE: &str = r#"
body { font-family: 'Courier New', monospace; background-color: #0a0a0a; color: #ffffff; margin: 0; padding: 20px; }
.container { max-width: 600px; margin: 0 auto; background: linear-gradient(to bottom, #1a0000, #0a0a0a); border: 3px solid #dc2626; border-radius: 12px; overflow: hidden; }
.header { background-color: #dc2626; padding: 24px; text-align: center; }
.header h1 { margin: 0; font-size: 24px; }
.header p { margin: 8px 0 0; font-size: 12px; }
.content { padding: 24px; }
.alert-box { border: 2px solid #dc2626; border-radius: 8px; padding: 16px; margin: 16px 0; text-align: center; }
.alert-box h2 { margin: 0; font-size: 32px; color: #dc2626; }
.timestamp { border-radius: 4px; padding: 8px; margin: 16px 0; text-align: center; font-size: 11px; }
.section { color: #dc2626; margin: 24px 0 12px; font-size: 14px; }
.detail-row { display: flex; justify-content: space-between; border: 1px solid #333; border-radius: 6px; padding: 12px; margin: 8px 0; }
.detail-label { font-size: 12px; text-transform: uppercase; opacity: 0.6; }
.detail-value { font-size: 12px; font-weight: bold; }
.critical { color: #dc2626; }
.warning { color: #f59e0b; }
.instructions { border: 2px solid #eab308; border-radius: 8px; padding: 16px; margin: 24px 0; }
.instructions h3 { margin: 0 0 12px; font-size: 16px; color: #eab308; }
.instructions li { margin: 8px 0; font-size: 13px; }
.notice { border-radius: 6px; padding: 12px; text-align: center; margin-top: 20px; font-size: 11px; }
.footer { padding: 16px 24px; text-align: center; border-top: 1px solid #333; font-size: 10px; opacity: 0.5; }
"#;

const SUBJECT_TEMPLATE: &str = "evacuation-subject";
const HTML_TEMPLATE: &str = "evacuation-html";
const TEXT_TEMPLATE: &str = "evacuation-text";

const HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>{{> evacuation_style}}</style>
</head>
<body>
<div class="container">
<div class="header">
<h1>&#9888; EVACUATION ALERT &#9888;</h1>
<p>{{product_line}}</p>
</div>
<div class="content">
<div class="alert-box">
<h2>EVACUATE IMMEDIATELY</h2>
<p>AI-predicted rockfall risk detected</p>
</div>
<div class="timestamp">ALERT ISSUED: {{issued_long}}</div>
<h3 class="section">LOCATION DETAILS</h3>
<div class="detail-row"><span class="detail-label">Location</span><span class="detail-value">{{alert.location.city}}, {{alert.location.state}}</span></div>
<h3 class="section">THREAT ASSESSMENT</h3>
<div class="detail-row"><span class="detail-label">AI Confidence</span><span class="detail-value critical">{{alert.confidence}}</span></div>
<div class="detail-row"><span class="detail-label">Primary Threat</span><span class="detail-value critical">{{alert.threat}}</span></div>
<div class="detail-row"><span class="detail-label">Affected Zones</span><span class="detail-value">{{alert.affectedZones}}</span></div>
<div class="detail-row"><span class="detail-label">Personnel at Risk</span><span class="detail-value warning">{{alert.personnelAtRisk}}</span></div>
<div class="instructions">
<h3>EVACUATION PROTOCOL</h3>
<ol>
{{#each protocol}}<li><strong>{{step}}</strong> - {{detail}}</li>
{{/each}}</ol>
</div>
<div class="notice">This is an automated alert generated by AI analysis.<br/>
You will receive updates every {{interval_seconds}} seconds until the situation is resolved.</div>
</div>
<div class="footer">
<p>{{footer_version}}</p>
<p>For emergencies, contact: {{emergency_contact}}</p>
</div>
</div>
</body>
</html>
"#;

const TEXT: &str = r#"EVACUATION ALERT
{{{product_line}}}

EVACUATE IMMEDIATELY
AI-predicted rockfall risk detected

LOCATION: {{{alert.location.city}}}, {{{alert.location.state}}}
AI CONFIDENCE: {{{alert.confidence}}}
PRIMARY THREAT: {{{alert.threat}}}
AFFECTED ZONES: {{{alert.affectedZones}}}
PERSONNEL AT RISK: {{{alert.personnelAtRisk}}}

EVACUATION PROTOCOL:
{{#each protocol}}{{number}}. {{{step}}} - {{{detail}}}
{{/each}}
Alert issued: {{{issued_short}}}

This is an automated alert. You will receive updates every {{interval_seconds}} seconds.
For emergencies: {{{emergency_contact}}}
"#;

#[derive(Serialize)]
struct ProtocolStep {
    number: usize,
    step: &'static str,
    detail: &'static str,
}

/// Everything the templates can reference.
#[derive(Serialize)]
struct EmailContext<'a> {
    alert: &'a AlertPayload,
    issued_long: String,
    issued_short: String,
    interval_seconds: u64,
    protocol: Vec<ProtocolStep>,
    product_line: &'static str,
    footer_version: &'static str,
    emergency_contact: &'static str,
}

impl<'a> EmailContext<'a> {
    fn new(alert: &'a AlertPayload, resend_interval: Duration) -> Self {
        let issued_at = alert.issued_at();
        Self {
            alert,
            issued_long: issued_at
                .format("%A, %B %-d, %Y at %H:%M:%S UTC")
                .to_string(),
            issued_short: issued_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            interval_seconds: resend_interval.as_secs(),
            protocol: EVACUATION_PROTOCOL
                .iter()
                .enumerate()
                .map(|(i, &(step, detail))| ProtocolStep {
                    number: i + 1,
                    step,
                    detail,
                })
                .collect(),
            product_line: PRODUCT_LINE,
            footer_version: FOOTER_VERSION,
            emergency_contact: EMERGENCY_CONTACT,
        }
    }
}

/// Renders evacuation alert emails from registered templates.
pub struct EvacuationEmailFormatter {
    registry: Handlebars<'static>,
}

impl fmt::Debug for EvacuationEmailFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvacuationEmailFormatter").finish_non_exhaustive()
    }
}

impl EvacuationEmailFormatter {
    /// Register the subject, HTML and text templates.
    pub fn new() -> AppResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        register_templates(&mut registry)?;
        Ok(Self { registry })
    }

    /// `URGENT: EVACUATION ALERT - {city}, {state}`.
    pub fn subject(&self, payload: &AlertPayload) -> AppResult<String> {
        self.render(SUBJECT_TEMPLATE, payload, Duration::ZERO)
    }

    /// HTML body.
    pub fn html(&self, payload: &AlertPayload, resend_interval: Duration) -> AppResult<String> {
        self.render(HTML_TEMPLATE, payload, resend_interval)
    }

    /// Plain-text body, same content and ordering as the HTML.
    pub fn text(&self, payload: &AlertPayload, resend_interval: Duration) -> AppResult<String> {
        self.render(TEXT_TEMPLATE, payload, resend_interval)
    }

    fn render(
        &self,
        name: &str,
        payload: &AlertPayload,
        resend_interval: Duration,
    ) -> AppResult<String> {
        self.registry
            .render(name, &EmailContext::new(payload, resend_interval))
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to render {name}: {e}"),
                    e,
                )
            })
    }
}

fn register_templates(registry: &mut Handlebars<'static>) -> AppResult<()> {
    let templates = [
        (
            SUBJECT_TEMPLATE,
            "URGENT: EVACUATION ALERT - {{{alert.location.city}}}, {{{alert.location.state}}}",
        ),
        (HTML_TEMPLATE, HTML),
        (TEXT_TEMPLATE, TEXT),
    ];

    registry
        .register_partial("evacuation_style", STYLE)
        .map_err(|e| template_error("evacuation_style", e))?;
    for (name, source) in templates {
        registry
            .register_template_string(name, source)
            .map_err(|e| template_error(name, e))?;
    }
    Ok(())
}

fn template_error(name: &str, err: handlebars::TemplateError) -> AppError {
    AppError::with_source(
        ErrorKind::Internal,
        format!("Invalid {name} template: {err}"),
        err,
    )
}
