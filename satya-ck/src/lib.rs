//! satya-ck library - Content Check service
//!
//! HTTP front for the credibility heuristic engine: identity endpoints,
//! credibility checks, and signal reports.

use axum::http::{header, Method};
use axum::Router;
use satya_common::identity::IdentityProvider;
use satya_common::orchestrator::Orchestrator;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;

/// Module name reported by /health
pub const MODULE_NAME: &str = "satya-ck";

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    pub fn identity(&self) -> &Arc<dyn IdentityProvider> {
        self.orchestrator.identity()
    }
}

/// CORS policy: any origin, preflight cached for an hour
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let auth = Router::new()
        .route("/api/auth/signup", post(api::sign_up))
        .route("/api/auth/login", post(api::sign_in))
        .route("/api/auth/logout", post(api::sign_out))
        .route("/api/auth/me", get(api::current_user));

    let analysis = Router::new()
        .route("/api/analyze", post(api::analyze))
        .route("/api/signals", post(api::signals));

    Router::new()
        .merge(auth)
        .merge(analysis)
        .merge(api::health_routes())
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Bind the HTTP listener and report the address actually bound
///
/// Port 0 asks the OS for a free port; the returned address carries it.
pub async fn bind_listener(bind: &str, port: u16) -> std::io::Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind((bind, port)).await?;
    let addr = listener.local_addr()?;
    Ok((listener, addr))
}
