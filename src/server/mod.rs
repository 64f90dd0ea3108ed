//! HTTP server for lead capture.

pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ConfigError, Result};
use crate::relay::{DisabledNotifier, LeadNotifier, SmtpNotifier};

pub use routes::contact_routes;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where captured leads are relayed.
    pub notifier: Arc<dyn LeadNotifier>,
    /// Bound on each relay attempt.
    pub relay_timeout: Duration,
}

impl AppState {
    pub fn new(notifier: Arc<dyn LeadNotifier>, relay_timeout: Duration) -> Self {
        Self {
            notifier,
            relay_timeout,
        }
    }
}

/// Pick the notifier the config asks for.
pub fn build_notifier(config: &ServerConfig) -> Result<Arc<dyn LeadNotifier>> {
    match &config.smtp {
        Some(smtp) => {
            let notifier = SmtpNotifier::new(smtp.clone(), config.relay_timeout).map_err(|e| {
                ConfigError::InvalidValue {
                    key: "SMTP_HOST".into(),
                    message: e.to_string(),
                }
            })?;
            Ok(Arc::new(notifier))
        }
        None => Ok(Arc::new(DisabledNotifier)),
    }
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let notifier = build_notifier(&config)?;
    let app = contact_routes(
        AppState::new(notifier, config.relay_timeout),
        &config.allowed_origins,
    );

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Lead capture server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Lead capture server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
