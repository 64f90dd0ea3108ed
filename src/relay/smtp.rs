//! SMTP notifier. Sends lead notifications through an SMTP relay via lettre.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::templates::{self, Rendered};
use super::{LeadNotifier, Recipient};
use crate::config::parse_or;
use crate::error::{ConfigError, RelayError};
use crate::lead::LeadSubmission;

// ── Configuration ───────────────────────────────────────────────────

/// SMTP relay configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    /// Sender of every notification.
    pub from_address: String,
    /// Internal inbox that receives new leads.
    pub operator_address: String,
}

impl SmtpConfig {
    /// Build config from a variable lookup.
    /// Returns `Ok(None)` if `SMTP_HOST` is not set (relay disabled).
    pub fn from_lookup(
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ConfigError> {
        let Some(host) = lookup("SMTP_HOST") else {
            return Ok(None);
        };

        let port = parse_or(lookup, "SMTP_PORT", 587)?;
        let username = lookup("SMTP_USERNAME").unwrap_or_default();
        let password = SecretString::from(lookup("SMTP_PASSWORD").unwrap_or_default());
        let from_address = lookup("SMTP_FROM_ADDRESS").unwrap_or_else(|| username.clone());
        if from_address.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "SMTP_FROM_ADDRESS".into(),
                hint: "Set it (or SMTP_USERNAME) when SMTP_HOST is configured".into(),
            });
        }

        let operator_address =
            lookup("MERCH_LEADS_OPERATOR_EMAIL").ok_or_else(|| ConfigError::MissingRequired {
                key: "MERCH_LEADS_OPERATOR_EMAIL".into(),
                hint: "New leads are sent to this inbox when SMTP_HOST is configured".into(),
            })?;

        Ok(Some(Self {
            host,
            port,
            username,
            password,
            from_address,
            operator_address,
        }))
    }
}

// ── Notifier ────────────────────────────────────────────────────────

pub struct SmtpNotifier {
    config: SmtpConfig,
    transport: SmtpTransport,
}

impl SmtpNotifier {
    /// `timeout` bounds each SMTP command, so a stalled server releases the
    /// blocking thread along with the relay attempt.
    pub fn new(config: SmtpConfig, timeout: Duration) -> Result<Self, RelayError> {
        crate::install_crypto_provider();

        let creds = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let transport = SmtpTransport::relay(&config.host)
            .map_err(|e| RelayError::Transport(format!("SMTP relay error: {e}")))?
            .port(config.port)
            .credentials(creds)
            .timeout(Some(timeout))
            .build();

        Ok(Self { config, transport })
    }

    /// Build the message for `recipient` without sending it.
    pub fn build_message(
        &self,
        lead: &LeadSubmission,
        recipient: Recipient,
    ) -> Result<Message, RelayError> {
        let (to, rendered, reply_to): (&str, Rendered, Option<&str>) = match recipient {
            Recipient::Operator => (
                self.config.operator_address.as_str(),
                templates::operator_message(lead, Utc::now()),
                Some(lead.email.as_str()),
            ),
            Recipient::Submitter => (
                lead.email.as_str(),
                templates::acknowledgment_message(lead),
                None,
            ),
        };

        let mut builder = Message::builder()
            .from(parse_mailbox(&self.config.from_address)?)
            .to(parse_mailbox(to)?)
            .subject(rendered.subject);
        if let Some(address) = reply_to {
            builder = builder.reply_to(parse_mailbox(address)?);
        }

        builder
            .body(rendered.body)
            .map_err(|e| RelayError::Build(e.to_string()))
    }
}

#[async_trait]
impl LeadNotifier for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn notify(&self, lead: &LeadSubmission, recipient: Recipient) -> Result<(), RelayError> {
        let message = self.build_message(lead, recipient)?;
        let transport = self.transport.clone();

        // lettre's SmtpTransport blocks.
        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| RelayError::TaskFailed(e.to_string()))?
            .map_err(|e| RelayError::Transport(format!("SMTP send failed: {e}")))?;

        debug!(%recipient, host = %self.config.host, "SMTP message accepted");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, RelayError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| RelayError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

// ── Tests ───────────────────────────────────────────────────────────
