//! # playhookd: playhook daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Load the JSON document and start the task that owns it
//! - Construct the host adapters and the action executor
//! - Construct the lifecycle service and the HTTP router
//! - Run the periodic backup and notification logging tasks
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT): abort running actions, then
//!   save the document
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use playhook_adapter_host_system::{HostProcesses, PactlAudio, ShellCommandRunner, XrandrDisplay};
use playhook_adapter_http_axum::state::AppState;
use playhook_adapter_storage_json::{Backups, JsonDocumentStore};
use playhook_app::executors::ActionExecutor;
use playhook_app::notification_bus::InProcessNotificationBus;
use playhook_app::services::{DocumentHandle, LifecycleService, load_or_default};
use playhook_domain::notification::NotificationKind;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Notifications
    let notifications = Arc::new(InProcessNotificationBus::new(256));
    let background = CancellationToken::new();
    let notification_log = spawn_notification_log(&notifications, background.clone());

    // Document
    let store = JsonDocumentStore::new(&config.storage.data_file);
    let document = load_or_default(&store, &notifications).await;
    let (documents, document_task) = DocumentHandle::spawn(store, document);
    tracing::info!(path = %config.storage.data_file.display(), "document loaded");

    // Engine
    let executor = ActionExecutor::new(
        HostProcesses::new(),
        ShellCommandRunner::new(),
        XrandrDisplay::new(),
        PactlAudio::new(),
        config.shell.to_shell_config(),
    );
    let lifecycle = Arc::new(LifecycleService::new(
        documents.clone(),
        HostProcesses::new(),
        executor,
        Arc::clone(&notifications),
    ));

    let backup_task = config.backup.enabled.then(|| {
        let backups = Backups::new(&config.backup.directory, config.backup.retention);
        spawn_backups(backups, documents.clone(), &config, background.clone())
    });

    // HTTP
    let state = AppState::new(
        Arc::clone(&lifecycle),
        documents.clone(),
        Arc::clone(&notifications),
    );
    let app = playhook_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("playhookd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shutting down");
    lifecycle.cancel_running();
    background.cancel();
    if let Some(task) = backup_task {
        let _ = task.await;
    }
    if let Err(err) = documents.shutdown().await {
        tracing::error!(error = %err, "final save failed");
    }
    let _ = document_task.await;
    let _ = notification_log.await;
    Ok(())
}

/// Mirror every notification into the log.
fn spawn_notification_log(
    notifications: &InProcessNotificationBus,
    stop: CancellationToken,
) -> JoinHandle<()> {
    let mut receiver = notifications.subscribe();
    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                () = stop.cancelled() => break,
                received = receiver.recv() => received,
            };
            match received {
                Ok(notification) => match notification.kind {
                    NotificationKind::Info => {
                        tracing::info!(message = %notification.message, "notification");
                    }
                    NotificationKind::Error => {
                        tracing::error!(message = %notification.message, "notification");
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification log lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Write a backup of the document on every interval tick.
fn spawn_backups(
    backups: Backups,
    documents: DocumentHandle,
    config: &Config,
    stop: CancellationToken,
) -> JoinHandle<()> {
    let period = config.backup_interval();
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(period);
        // The first tick completes immediately; skip it so startup does not
        // write a backup of what was just loaded.
        ticks.tick().await;
        loop {
            tokio::select! {
                () = stop.cancelled() => break,
                _ = ticks.tick() => {}
            }
            let document = match documents.snapshot().await {
                Ok(document) => document,
                Err(err) => {
                    tracing::error!(error = %err, "backup skipped, document unavailable");
                    break;
                }
            };
            if let Err(err) = backups.write(&document).await {
                tracing::error!(error = %err, dir = %backups.dir().display(), "backup failed");
            }
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
