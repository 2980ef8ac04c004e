use clap::Parser;
use config_engine::{ConfigEngine, Settings};
use error_common::{HospitalError, Result};
use std::net::SocketAddr;
use tracing::info;

use hospital_server::{create_app, AppState};

/// Hospital Engine HTTP Server
#[derive(Parser, Debug)]
#[command(name = "hospital-server")]
#[command(about = "Appointment booking API for patients and doctors")]
struct Args {
    /// Server bind address (overrides server.host)
    #[arg(long, env = "HOSPITAL_HOST")]
    host: Option<String>,

    /// Server port (overrides server.port)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, default_value = "hospital.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = ConfigEngine::new()
        .with_file(&args.config)
        .load()
        .map_err(|e| HospitalError::ConfigError(e.to_string()))?;

    if let Some(host) = &args.host {
        settings.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    if let Err(e) = run(&args).await {
        error_common::log_error("hospital-server", &e).await;
        return Err(e.into());
    }
    Ok(())
}

async fn run(args: &Args) -> Result<()> {
    let settings = load_settings(args)?;

    logger_redacted::init(&settings.logging, args.verbose)
        .map_err(|e| HospitalError::InternalError(e.to_string()))?;

    info!("Starting Hospital Engine HTTP Server");
    info!(version = env!("CARGO_PKG_VERSION"), "Version");

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .map_err(|e| {
            HospitalError::ConfigError(format!(
                "Invalid bind address {}:{}: {e}",
                settings.server.host, settings.server.port
            ))
        })?;

    let state = AppState::from_settings(settings).await?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| HospitalError::NetworkError(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server running on http://{addr}");
    info!("Health check available at: http://{addr}/health");
    info!("API available at: http://{addr}/api");
    info!("API docs available at: http://{addr}/docs");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HospitalError::ServerError(format!("HTTP server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
