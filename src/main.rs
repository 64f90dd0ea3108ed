use merch_leads::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install rustls crypto provider before any TLS usage
    merch_leads::install_crypto_provider();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;

    eprintln!("📮 Merch Leads v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Contact API: http://{}/contact", config.socket_addr());
    eprintln!("   Relay timeout: {}s", config.relay_timeout.as_secs());
    match &config.smtp {
        Some(smtp) => eprintln!(
            "   Notifications: SMTP via {}:{} (operator: {})",
            smtp.host, smtp.port, smtp.operator_address
        ),
        None => eprintln!("   Notifications: disabled (SMTP_HOST not set)"),
    }
    if config.allowed_origins.is_empty() {
        eprintln!("   CORS: same-origin only\n");
    } else {
        eprintln!("   CORS: {} allowed origin(s)\n", config.allowed_origins.len());
    }

    merch_leads::server::serve(config).await?;

    Ok(())
}
