use crate::config::PerceptionConfig;
use crate::handlers;
use crate::services::providers::{
    MeteredProvider, MockCompletionProvider, OpenAiProvider, ProviderBackend,
};
use crate::services::{
    AltTextStore, CompletionProvider, ConversationStore, InMemoryAltTextStore,
    InMemoryConversationStore, InMemoryPreferenceStore, PreferenceStore,
};
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
    pub config: PerceptionConfig,
    pub preferences: Arc<dyn PreferenceStore>,
    pub conversations: Arc<dyn ConversationStore>,
    pub alt_text: Arc<dyn AltTextStore>,
    pub provider: Arc<dyn CompletionProvider>,
}

impl AppState {
    /// State with empty in-memory stores.
    pub fn in_memory(config: PerceptionConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            config,
            preferences: Arc::new(InMemoryPreferenceStore::new()),
            conversations: Arc::new(InMemoryConversationStore::new()),
            alt_text: Arc::new(InMemoryAltTextStore::new()),
            provider,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let allowed_origins = state.config.common.allowed_origins();

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/api/preferences/:user_id",
            get(handlers::get_preferences).put(handlers::update_preferences),
        )
        .route(
            "/api/font-size/:user_id",
            get(handlers::get_font_size).post(handlers::adjust_font_size),
        )
        .route("/api/chat", post(handlers::chat))
        .route("/api/chatgpt", post(handlers::chatgpt))
        .route("/api/simplify", post(handlers::simplify))
        .route("/api/generate-alt-text", post(handlers::generate_alt_text))
        .route("/api/read-aloud", post(handlers::read_aloud))
        .route(
            "/api/conversations/:user_id",
            get(handlers::list_conversations),
        )
        .route(
            "/api/conversation/:conversation_id",
            get(handlers::get_conversation),
        )
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| make_request_span(req)))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer(&allowed_origins))
        .with_state(state)
}

fn build_provider(config: &PerceptionConfig) -> Result<Arc<dyn CompletionProvider>, AppError> {
    let provider: Arc<dyn CompletionProvider> = match config.provider.backend()? {
        ProviderBackend::OpenAi => {
            let openai = OpenAiProvider::new(config.provider.openai()).map_err(|e| {
                tracing::error!("Failed to initialize OpenAI provider: {}", e);
                AppError::ConfigError(anyhow::Error::new(e))
            })?;
            Arc::new(MeteredProvider::new(openai))
        }
        ProviderBackend::Mock => Arc::new(MeteredProvider::new(MockCompletionProvider::default())),
    };

    tracing::info!(
        provider = provider.name(),
        chat_model = %config.provider.chat_model,
        vision_model = %config.provider.vision_model,
        "Initialized completion provider"
    );

    Ok(provider)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: PerceptionConfig) -> Result<Self, AppError> {
        let provider = build_provider(&config)?;

        // Reachability check only; an unhealthy provider does not block startup.
        let checked = provider.clone();
        tokio::spawn(async move {
            match checked.health_check().await {
                Ok(()) => tracing::info!(provider = checked.name(), "Provider reachable"),
                Err(e) => tracing::warn!(
                    provider = checked.name(),
                    "Provider health check failed: {}",
                    e
                ),
            }
        });

        Self::build_with_provider(config, provider).await
    }

    /// Build with an explicit provider, bypassing the configured backend.
    pub async fn build_with_provider(
        config: PerceptionConfig,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState::in_memory(config.clone(), provider);
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
