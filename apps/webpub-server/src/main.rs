//! Web publication server
//!
//! Exposes EPUB files from a library directory as web publications:
//! a JSON manifest, a web-app manifest, a reader page and raw assets.

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webpub_server::config::{Config, DeploymentMode};
use webpub_server::html::IndexTemplate;
use webpub_server::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "webpub-server", version, about = "Serve EPUB files as web publications")]
struct Cli {
    /// Deployment mode; overrides WEBPUB_MODE
    #[arg(value_enum)]
    mode: Option<DeploymentMode>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webpub_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env(cli.mode).context("Failed to load configuration")?;

    tracing::info!("Starting webpub-server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Mode: {:?}", config.mode);
    tracing::info!("Library root: {}", config.library.root.display());
    tracing::info!("Public directory: {}", config.library.public_dir.display());

    let index_template = IndexTemplate::load(&config.library.index_template)
        .with_context(|| {
            format!(
                "Failed to read index template {}",
                config.library.index_template.display()
            )
        })?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = webpub_server::app(AppState::new(config, index_template));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("webpub-server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
