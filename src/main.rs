//! minidns server binary
//!
//! Loads configuration, installs logging, and runs the UDP responder until
//! Ctrl+C.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use minidns::config::ServerConfig;
use minidns::dns::{self, DnsHandler};

/// minidns - Minimal authoritative DNS responder
#[derive(Parser, Debug)]
#[command(name = "minidns")]
#[command(version)]
#[command(about = "Minimal authoritative DNS responder over UDP", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "minidns.toml")]
    config: PathBuf,

    /// UDP address to listen on (overrides the config file)
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config_found = args.config.exists();
    let config = if config_found && !args.write_default_config {
        ServerConfig::load(&args.config)?
    } else {
        ServerConfig::default()
    };

    // Override config with CLI args
    let config = config
        .with_bind_address(args.bind)
        .with_log_level(args.log_level.clone());

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .init();

    if args.write_default_config {
        config.save(&args.config)?;
        info!("📝 Default configuration written to {:?}", args.config);
        return Ok(());
    }

    info!("🌐 minidns v{}", env!("CARGO_PKG_VERSION"));

    if !config_found {
        warn!("Config file {:?} not found, using defaults", args.config);
    }

    config.validate()?;

    info!("⚙️  Configuration:");
    info!("   Bind address: {}", config.bind_address);
    info!("   Encode buffer: {} bytes (max {})", config.encode_buffer_size, config.max_message_size);
    info!("   Answer TTL: {}s", config.answer_ttl_secs);
    info!("   Zone entries: {}", config.zone.len());

    let handler = Arc::new(DnsHandler::from_config(&config)?);
    let shared_config = Arc::new(config);

    let dns_handle = tokio::spawn(dns::run_dns_server(shared_config.clone(), handler));

    info!("✅ DNS server started");
    info!("   Press Ctrl+C to shutdown gracefully");

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("🛑 Shutdown signal received");
        }
        result = dns_handle => {
            match result {
                Ok(Ok(())) => info!("DNS server exited"),
                Ok(Err(e)) => {
                    error!("DNS server failed: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    error!("DNS server task panicked: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    info!("👋 minidns shutting down");
    Ok(())
}
