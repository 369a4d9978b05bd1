use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use services::{AnalysisService, CredentialCheck};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{AppState, build_router};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Options for running the HTTP server.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "STUDY_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Shared login password
    #[arg(long, env = "STUDY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl ServeArgs {
    /// Handler state from these options plus the model settings in the environment.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        let credentials = CredentialCheck::new(self.password.clone());
        if !credentials.is_configured() {
            warn!("no login password configured; every login will be rejected");
        }
        AppState::new(credentials, Arc::new(AnalysisService::from_env()))
    }
}

/// Serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run(args: ServeArgs) -> Result<()> {
    let app = build_router(args.app_state());

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!("listening on http://{}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl+C");
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
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received terminate signal, shutting down"),
    }
}
