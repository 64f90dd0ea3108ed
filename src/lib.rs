//! Merch Leads: lead capture for campaign merchandise requests.

pub mod config;
pub mod envelope;
pub mod error;
pub mod lead;
pub mod relay;
pub mod server;
pub mod wizard;

/// Install the ring rustls crypto provider process-wide.
///
/// Must run before any TLS client is built. Repeated calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}
