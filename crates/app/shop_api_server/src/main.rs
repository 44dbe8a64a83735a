//! Storefront API server binary.
//!
//! Serves the shopping-assistant chat endpoint and the checkout-session
//! endpoint. Credentials and tuning come from the environment (or a `.env`
//! file); the listen address, catalog and checkout profile can also be given
//! on the command line.

use std::path::PathBuf;

use clap::Parser;
use shop_api::config::{DEFAULT_BIND_ADDR, DEFAULT_CATALOG_PATH, DEFAULT_CHECKOUT_PROFILE};
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "shop_api_server", about = "Storefront API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind_addr: String,

    /// Product catalog JSON file.
    #[arg(long, env = "CATALOG_PATH", default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Checkout profile: `glass-pane`, `minimal`, or a path to a JSON profile.
    #[arg(long, env = "CHECKOUT_PROFILE", default_value = DEFAULT_CHECKOUT_PROFILE)]
    checkout_profile: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shop_api=debug,shop_core=debug,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = shop_api::config::ApiConfig {
        bind_addr: args.bind_addr,
        catalog_path: args.catalog,
        checkout_profile: args.checkout_profile,
        ..shop_api::config::ApiConfig::from_env()
    };

    info!(
        bind_addr = %config.bind_addr,
        catalog = %config.catalog_path.display(),
        checkout_profile = %config.checkout_profile,
        model = %config.completion.model,
        "starting shop_api_server"
    );
    if config.completion.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; /api/chat will answer 500");
    }
    if config.stripe.secret_key.is_none() {
        warn!("STRIPE_SECRET_KEY is not set; checkout sessions will fail");
    }

    let state = shop_api::AppState::from_config(config.clone())?;
    info!(products = state.catalog.len(), "catalog ready");

    let app = shop_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
