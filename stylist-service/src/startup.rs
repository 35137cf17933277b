use crate::config::StylistConfig;
use crate::handlers;
use crate::services::{FontPreferenceStore, InMemoryFontPreferenceStore};
use axum::{
    body::Body,
    http::Request,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::cors_layer, metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: StylistConfig,
    pub store: Arc<dyn FontPreferenceStore>,
}

pub fn build_router(state: AppState) -> Router {
    let allowed_origins = state.config.common.allowed_origins();

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/api/font-preferences",
            post(handlers::create_font_preference),
        )
        .route(
            "/api/font-preferences/current",
            get(handlers::get_current_font_preference),
        )
        .route(
            "/api/font-preferences/:id",
            get(handlers::get_font_preference)
                .put(handlers::update_font_preference)
                .delete(handlers::delete_font_preference),
        )
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| make_request_span(req)))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer(&allowed_origins))
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: StylistConfig) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            store: Arc::new(InMemoryFontPreferenceStore::new()),
        };
        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
