//! HTTP boundary for the study helper: password check and answer analysis.

use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use services::{AnalysisService, CredentialCheck};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;

pub use config::{DEFAULT_BIND, ServeArgs, run};

/// Shared, immutable handler state.
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialCheck,
    pub analysis: Arc<AnalysisService>,
}

impl AppState {
    #[must_use]
    pub fn new(credentials: CredentialCheck, analysis: Arc<AnalysisService>) -> Self {
        Self {
            credentials,
            analysis,
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/auth", post(api::login))
        .route("/analyze", post(api::analyze))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
