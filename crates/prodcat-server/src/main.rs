mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(prodcat_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let sites = if config.sites_path.exists() {
        Arc::new(prodcat_core::load_sites(&config.sites_path)?)
    } else {
        tracing::info!(path = %config.sites_path.display(), "sites file not found, using built-in catalog");
        Arc::new(prodcat_core::SitesFile::builtin())
    };

    let brands = if config.brands_path.exists() {
        Arc::new(prodcat_core::load_brand_vocabulary(&config.brands_path)?)
    } else {
        tracing::info!(path = %config.brands_path.display(), "brands file not found, using built-in vocabulary");
        Arc::new(prodcat_core::BrandVocabulary::builtin())
    };

    let client = Arc::new(prodcat_scraper::PageClient::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
    )?);

    let app = build_app(AppState {
        config: Arc::clone(&config),
        sites,
        brands,
        client,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
