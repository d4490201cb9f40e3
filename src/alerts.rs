//! Delivery of severity-filtered alerts by email (Resend or SMTP) and SMS
//! (Twilio).
//!
//! Channels are optional: each is enabled only when its credentials are
//! present. Resend takes precedence over SMTP for email. Delivery failures
//! are logged and reported per channel rather than returned as errors.

use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config;
use crate::error::{Result, SupplyRiskError};
use crate::models::CommodityReport;
use crate::report::{self, SeverityFilter};

/// Twilio rejects message bodies longer than this.
pub const SMS_MAX_CHARS: usize = 1600;

pub const DEFAULT_SMTP_PORT: u16 = 587;

/// A way of delivering a text alert to one recipient.
pub trait AlertChannel: Send + Sync {
    fn name(&self) -> &'static str;

    fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// AlertConfig
// ---------------------------------------------------------------------------

/// Credentials for the alert channels. Unset fields disable a channel.
#[derive(Debug, Clone, Default)]
pub struct AlertConfig {
    pub resend_api_key: Option<String>,
    pub email_from: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_phone_number: Option<String>,
}

impl AlertConfig {
    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self {
            resend_api_key: env_var("RESEND_API_KEY"),
            email_from: env_var("RESEND_FROM").or_else(|| env_var("SMTP_FROM")),
            smtp_host: env_var("SMTP_HOST"),
            smtp_port: env_var("SMTP_PORT").and_then(|p| p.parse().ok()),
            smtp_user: env_var("SMTP_USER"),
            smtp_password: env_var("SMTP_PASSWORD"),
            twilio_account_sid: env_var("TWILIO_ACCOUNT_SID"),
            twilio_auth_token: env_var("TWILIO_AUTH_TOKEN"),
            twilio_phone_number: env_var("TWILIO_PHONE_NUMBER"),
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// ResendEmail
// ---------------------------------------------------------------------------

pub struct ResendEmail {
    api_url: String,
    api_key: String,
    from: String,
    client: Client,
}

impl ResendEmail {
    pub fn new(api_key: &str, from: Option<&str>, timeout: Duration) -> Result<Self> {
        Self::with_api_url(config::RESEND_API_URL, api_key, from, timeout)
    }

    pub fn with_api_url(
        api_url: &str,
        api_key: &str,
        from: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            from: from.unwrap_or(config::DEFAULT_ALERT_SENDER).to_string(),
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

impl AlertChannel for ResendEmail {
    fn name(&self) -> &'static str {
        "email"
    }

    fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        self.client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.from,
                "to": [recipient],
                "subject": subject,
                "text": body,
            }))
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SmtpEmail
// ---------------------------------------------------------------------------

/// Plain-text email over an authenticated STARTTLS relay.
pub struct SmtpEmail {
    from: Mailbox,
    transport: SmtpTransport,
}

impl SmtpEmail {
    pub fn new(
        host: &str,
        port: u16,
        user: &str,
        password: &str,
        from: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let from = from
            .parse::<Mailbox>()
            .map_err(|e| SupplyRiskError::Email(format!("parse from address: {e}")))?;
        let transport = SmtpTransport::starttls_relay(host)
            .map_err(|e| SupplyRiskError::Email(format!("create SMTP transport: {e}")))?
            .port(port)
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .timeout(Some(timeout))
            .build();
        Ok(Self { from, transport })
    }
}

impl AlertChannel for SmtpEmail {
    fn name(&self) -> &'static str {
        "email"
    }

    fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        let to = recipient
            .parse::<Mailbox>()
            .map_err(|e| SupplyRiskError::Email(format!("parse recipient: {e}")))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| SupplyRiskError::Email(format!("build message: {e}")))?;
        self.transport
            .send(&message)
            .map_err(|e| SupplyRiskError::Email(format!("send SMTP email: {e}")))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TwilioSms
// ---------------------------------------------------------------------------

pub struct TwilioSms {
    api_base: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
    client: Client,
}

impl TwilioSms {
    pub fn new(
        account_sid: &str,
        auth_token: &str,
        from_number: &str,
        timeout: Duration,
    ) -> Result<Self> {
        Self::with_api_base(config::TWILIO_API_BASE, account_sid, auth_token, from_number, timeout)
    }

    pub fn with_api_base(
        api_base: &str,
        account_sid: &str,
        auth_token: &str,
        from_number: &str,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            from_number: from_number.to_string(),
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

impl AlertChannel for TwilioSms {
    fn name(&self) -> &'static str {
        "sms"
    }

    fn send(&self, recipient: &str, _subject: &str, body: &str) -> Result<()> {
        let url = format!("{}/Accounts/{}/Messages.json", self.api_base, self.account_sid);
        let text: String = body.chars().take(SMS_MAX_CHARS).collect();
        self.client
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("Body", text.as_str()),
                ("From", self.from_number.as_str()),
                ("To", recipient),
            ])
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AlertDispatcher
// ---------------------------------------------------------------------------

/// Which channels are able to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStatus {
    pub email: bool,
    pub sms: bool,
}

/// Per-channel delivery result of one alert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertOutcome {
    pub email: bool,
    pub sms: bool,
    pub error: Option<String>,
}

impl AlertOutcome {
    pub fn sent(&self) -> bool {
        self.email || self.sms
    }
}

/// Formats reports and fans them out to the configured channels.
#[derive(Default)]
pub struct AlertDispatcher {
    email: Option<Box<dyn AlertChannel>>,
    sms: Option<Box<dyn AlertChannel>>,
}

impl AlertDispatcher {
    /// Build the channels `config` has credentials for.
    pub fn from_config(config: &AlertConfig, timeout: Duration) -> Result<Self> {
        let email: Option<Box<dyn AlertChannel>> = match (
            &config.resend_api_key,
            &config.smtp_host,
            &config.smtp_user,
            &config.smtp_password,
            &config.email_from,
        ) {
            (Some(key), ..) => Some(Box::new(ResendEmail::new(
                key,
                config.email_from.as_deref(),
                timeout,
            )?) as Box<dyn AlertChannel>),
            (None, Some(host), Some(user), Some(password), Some(from)) => {
                Some(Box::new(SmtpEmail::new(
                    host,
                    config.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
                    user,
                    password,
                    from,
                    timeout,
                )?) as Box<dyn AlertChannel>)
            }
            _ => None,
        };
        let sms = match (
            &config.twilio_account_sid,
            &config.twilio_auth_token,
            &config.twilio_phone_number,
        ) {
            (Some(sid), Some(token), Some(from)) => {
                Some(Box::new(TwilioSms::new(sid, token, from, timeout)?) as Box<dyn AlertChannel>)
            }
            _ => None,
        };
        Ok(Self { email, sms })
    }

    /// Dispatcher with explicit channels.
    pub fn with_channels(
        email: Option<Box<dyn AlertChannel>>,
        sms: Option<Box<dyn AlertChannel>>,
    ) -> Self {
        Self { email, sms }
    }

    pub fn status(&self) -> ChannelStatus {
        ChannelStatus {
            email: self.email.is_some(),
            sms: self.sms.is_some(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.email.is_some() || self.sms.is_some()
    }

    /// Fails with [`SupplyRiskError::NotConfigured`] when no channel is set up.
    pub fn ensure_configured(&self) -> Result<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(SupplyRiskError::NotConfigured(
                "Alerts not configured. Set RESEND_API_KEY, SMTP_* or TWILIO_* env vars."
                    .to_string(),
            ))
        }
    }

    /// Send the reports `filter` admits to the given recipients.
    ///
    /// SMS is attempted only when `recipient_phone` is given.
    pub fn send_report_alert(
        &self,
        reports: &[CommodityReport],
        recipient_email: &str,
        recipient_phone: Option<&str>,
        filter: SeverityFilter,
    ) -> AlertOutcome {
        let mut outcome = AlertOutcome::default();
        if reports.is_empty() {
            outcome.error = Some("No commodities to report".to_string());
            return outcome;
        }
        if !self.is_configured() {
            outcome.error = Some(
                "Email/SMS not configured. Set RESEND_API_KEY, SMTP_* or TWILIO_* env vars."
                    .to_string(),
            );
            return outcome;
        }

        let body = report::format_alert_body(reports, filter);
        if let Some(channel) = &self.email {
            if !recipient_email.is_empty() {
                outcome.email = deliver(channel.as_ref(), recipient_email, &body);
            }
        }
        if let (Some(channel), Some(phone)) = (&self.sms, recipient_phone) {
            outcome.sms = deliver(channel.as_ref(), phone, &body);
        }
        outcome
    }
}

fn deliver(channel: &dyn AlertChannel, recipient: &str, body: &str) -> bool {
    match channel.send(recipient, report::ALERT_SUBJECT, body) {
        Ok(()) => {
            tracing::info!(channel = channel.name(), recipient, "alert sent");
            true
        }
        Err(e) => {
            tracing::error!(channel = channel.name(), error = %e, "alert delivery failed");
            false
        }
    }
}
