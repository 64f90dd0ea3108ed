//! Best-effort notification relay for captured leads.
//!
//! A lead counts as captured once it is validated and logged. Notifying
//! the operator and acknowledging the submitter happen afterwards, off the
//! response path: each attempt is bounded by a timeout and every failure
//! is logged and dropped.

pub mod smtp;
pub mod templates;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::RelayError;
use crate::lead::LeadSubmission;

pub use smtp::{SmtpConfig, SmtpNotifier};

/// Who a notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    /// The vendor's internal sales inbox.
    Operator,
    /// The person who filled in the form.
    Submitter,
}

impl Recipient {
    /// Delivery order for every captured lead.
    pub const ORDER: [Recipient; 2] = [Self::Operator, Self::Submitter];
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operator => f.write_str("operator"),
            Self::Submitter => f.write_str("submitter"),
        }
    }
}

/// Hands a validated lead to an external notification service.
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn notify(&self, lead: &LeadSubmission, recipient: Recipient) -> Result<(), RelayError>;
}

/// Notifier used when no provider is configured. Sends nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

#[async_trait]
impl LeadNotifier for DisabledNotifier {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn notify(&self, _lead: &LeadSubmission, recipient: Recipient) -> Result<(), RelayError> {
        debug!(%recipient, "Notifications disabled, skipping");
        Ok(())
    }
}

/// Outcome of relaying one lead.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelayReport {
    pub delivered: Vec<Recipient>,
    pub failed: Vec<Recipient>,
}

/// Notify every recipient in [`Recipient::ORDER`], one after another.
///
/// Never fails: each error or timeout is logged and recorded in the report.
pub async fn relay_lead(
    notifier: &dyn LeadNotifier,
    timeout: Duration,
    submission_id: Uuid,
    lead: &LeadSubmission,
) -> RelayReport {
    let mut report = RelayReport::default();

    for recipient in Recipient::ORDER {
        let outcome = match tokio::time::timeout(timeout, notifier.notify(lead, recipient)).await {
            Ok(result) => result,
            Err(_) => Err(RelayError::Timeout {
                recipient: recipient.to_string(),
                timeout,
            }),
        };

        match outcome {
            Ok(()) => {
                info!(
                    %submission_id,
                    %recipient,
                    notifier = notifier.name(),
                    "Lead notification sent"
                );
                report.delivered.push(recipient);
            }
            Err(e) => {
                warn!(
                    %submission_id,
                    %recipient,
                    notifier = notifier.name(),
                    error = %e,
                    "Lead notification failed"
                );
                report.failed.push(recipient);
            }
        }
    }

    report
}

/// Run [`relay_lead`] on a detached task.
pub fn spawn_relay(
    notifier: Arc<dyn LeadNotifier>,
    timeout: Duration,
    submission_id: Uuid,
    lead: LeadSubmission,
) -> JoinHandle<RelayReport> {
    tokio::spawn(async move { relay_lead(notifier.as_ref(), timeout, submission_id, &lead).await })
}
