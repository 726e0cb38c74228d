use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::app::create_app;
use crate::configs::Settings;
use crate::services::{PrinterWatcher, SharedStatus};

pub mod app;
pub mod configs;
pub mod errors;
pub mod handles;
pub mod models;
pub mod services;

pub async fn run(settings: &Arc<Settings>) -> anyhow::Result<()> {
    let status = SharedStatus::default();
    let app = create_app(status.clone());

    let watcher = PrinterWatcher::new(
        settings.printer.clone(),
        settings.logger.silent,
        status.clone(),
    );

    // Transport failures are fatal by design: report and exit, no reconnect.
    tokio::spawn(async move {
        match watcher.run().await {
            Ok(()) => tracing::info!("printer session ended"),
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        }
    });

    let ip_addr = settings
        .server
        .host
        .parse::<IpAddr>()
        .with_context(|| format!("invalid server host {:?}", settings.server.host))?;

    let address = SocketAddr::from((ip_addr, settings.server.port));

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind status server on {address}"))?;

    tracing::info!("status endpoint on http://{address}/status");

    axum::serve(listener, app).await?;

    Ok(())
}
