//! Wire the database, event bus and notifier into a running HTTP server.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::{self, AppState};
use crate::banner::{BannerInfo, print_banner, print_goodbye};
use crate::config::ServerConfig;
use crate::db::Database;
use crate::events::EventBus;
use crate::notifier;

/// Serve the API until Ctrl+C.
pub async fn serve(config: ServerConfig, db: Database) -> Result<()> {
    let events = Arc::new(EventBus::default());
    let notifier = notifier::spawn(db.clone(), events.subscribe());

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    let url = format!("http://{}", listener.local_addr()?);
    print_banner(&BannerInfo::new(&config, &url));
    info!(%url, "listening");

    if config.open_browser {
        if let Err(e) = open::that(format!("{url}/api/dashboard/stats")) {
            warn!(error = %e, "could not open browser");
        }
    }

    let app = api::router(AppState::new(db, events, config.tenant));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    notifier.abort();
    print_goodbye();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
