//! Toss & Trips booking backend HTTP server.
//!
//! Wires the store, the confirmation worker, and the Axum router, then
//! serves until ctrl-c / SIGTERM.

mod config;

use crate::config::Config;
use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tnt_core::{PricingPolicy, RankingPolicy};
use tnt_mailer::{ConsoleMailer, Mailer, SmtpMailer};
use tnt_pipeline::ConfirmationPipeline;
use tnt_queue::{JobQueue, RetryPolicy, Worker};
use tnt_store::Store;
use tnt_web::{build_router, AppState};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Toss & Trips booking backend");

    let config = Config::from_env();

    // Prometheus exporter; failure to bind is not fatal.
    let metrics_addr: SocketAddr =
        format!("{}:{}", config.server.metrics_host, config.server.metrics_port)
            .parse()
            .context("invalid metrics address")?;
    if let Err(err) = PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
    {
        warn!(error = %err, "metrics exporter not started");
    }

    info!(url = %config.postgres.url, "connecting to database");
    let store = Store::connect(&config.postgres).await?;
    store.migrate().await?;

    let mailer: Arc<dyn Mailer> = match config.smtp.clone() {
        Some(smtp) => {
            info!(host = %smtp.host, port = smtp.port, "SMTP transport configured");
            Arc::new(SmtpMailer::new(smtp))
        }
        None => {
            info!("SMTP not configured, emails go to the console");
            Arc::new(ConsoleMailer::new())
        }
    };

    // Confirmation pipeline: queue, handler, one worker task.
    let (queue, receiver) = JobQueue::new();
    let handler = ConfirmationPipeline::new(
        store.clone(),
        mailer,
        config.pipeline.clone(),
        PricingPolicy::default(),
    );
    let worker = Worker::new(handler, RetryPolicy::default(), queue.clone(), receiver);
    let worker_handle = tokio::spawn(worker.run());
    info!("confirmation worker started");

    let state = AppState::new(store, queue, RankingPolicy::default());
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("HTTP server stopped, shutting down worker");
    worker_handle.abort();
    Ok(())
}

/// Resolves on ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => warn!(error = %err, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("ctrl-c received"),
        () = terminate => info!("SIGTERM received"),
    }
}
