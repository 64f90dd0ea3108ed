//! How the wizard delivers a finished lead to the contact endpoint.

use async_trait::async_trait;
use tracing::debug;

use crate::envelope::Envelope;
use crate::error::SubmitError;
use crate::lead::LeadSubmission;

/// Sends one lead and returns the server's success envelope.
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    async fn submit(&self, lead: &LeadSubmission) -> Result<Envelope, SubmitError>;
}

/// Posts leads as JSON to `<base_url>/contact`.
#[derive(Debug, Clone)]
pub struct HttpSubmitTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmitTransport {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/contact", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmitTransport for HttpSubmitTransport {
    async fn submit(&self, lead: &LeadSubmission) -> Result<Envelope, SubmitError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(lead)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;
        let envelope = serde_json::from_slice::<Envelope>(&body);
        debug!(status = status.as_u16(), "Contact endpoint responded");

        match envelope {
            Ok(envelope) if status.is_success() && envelope.success => Ok(envelope),
            Ok(envelope) => Err(SubmitError::Rejected {
                status: status.as_u16(),
                envelope: Some(envelope),
            }),
            Err(_) if !status.is_success() => Err(SubmitError::Rejected {
                status: status.as_u16(),
                envelope: None,
            }),
            Err(e) => Err(SubmitError::Decode(e.to_string())),
        }
    }
}
