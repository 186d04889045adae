//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] loads configuration, picks the cache driver, wires the
//! services into [`AppState`], and serves the router built by [`create_router`].

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, stamp_req, RequestStamp};
use crate::services::{AiServiceClient, ChatService};
use axum::{routing::{get, post}, Router};
use lib_core::{create_pool, CacheDriver, CacheStore, Config, HistoryCache, MemoryStore, SqliteStore};
use lib_utils::{IdGenerator, RandomIdGenerator};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub ai: Arc<AiServiceClient>,
    pub chat: Arc<ChatService>,
}

impl AppState {
    /// Wire the services together over the given store and id source.
    pub fn new(config: Config, store: Arc<dyn CacheStore>, ids: Arc<dyn IdGenerator>) -> anyhow::Result<Self> {
        let ai = Arc::new(AiServiceClient::new(config.ai_service_url.clone(), config.ai_timeout())?);
        let history = Arc::new(HistoryCache::new(store, config.history_limit, config.history_ttl()));
        let chat = Arc::new(ChatService::new(Arc::clone(&ai), history, ids));

        Ok(Self { config, ai, chat })
    }
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<AiServiceClient> {
    fn from_ref(state: &AppState) -> Self {
        state.ai.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<ChatService> {
    fn from_ref(state: &AppState) -> Self {
        state.chat.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            allowed_origins: vec![
                "http://localhost:8000".to_string(),
                "http://127.0.0.1:8000".to_string(),
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - The tracing subscriber cannot be installed
/// - Configuration loading or validation fails
/// - The cache store cannot be opened
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => tracing_subscriber::EnvFilter::new(&log_level),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    info!(" CHAT GATEWAY STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::load()?;
    info!(" AI service: {} (timeout {}s)", app_config.ai_service_url, app_config.ai_timeout_secs);

    let store = build_store(&app_config).await?;
    info!(
        " History cache: {} driver, {} messages, {} days",
        store.name(),
        app_config.history_limit,
        app_config.history_ttl_days
    );

    let static_dir = app_config.static_dir.clone();
    let state = AppState::new(app_config, store, Arc::new(RandomIdGenerator))?;

    let app = create_router(state, &static_dir, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Open the cache store selected by `CACHE_DRIVER`.
pub async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn CacheStore>> {
    match config.cache_driver {
        CacheDriver::Memory => Ok(Arc::new(MemoryStore::new())),
        CacheDriver::Database => {
            if let Some(db_path) = config.database_url.strip_prefix("sqlite:") {
                let db_path = db_path.trim_start_matches("//");
                if let Some(parent) = std::path::Path::new(db_path).parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                        info!("Created database directory: {:?}", parent);
                    }
                }
            }

            info!("Connecting to cache database {}...", config.database_url);
            let pool = create_pool(&config.database_url).await?;
            let store = SqliteStore::new(pool).await?;
            let purged = store.purge_expired().await?;
            info!(" Purged {} expired cache rows", purged);
            Ok(Arc::new(store))
        }
    }
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, static_dir: &str, allowed_origins: &[String]) -> Router {
    use axum::http::{HeaderValue, Method};

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT]);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/", get(handlers::page::index))
        .route("/chat", get(handlers::page::index))
        .route("/api/chat/send", post(handlers::chat::send_message))
        .route("/api/chat/questions", get(handlers::chat::get_questions))
        .route("/api/chat/history/{user_id}", get(handlers::chat::get_history))
        .route("/health", get(handlers::health::health))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        // Innermost first: logging sees the stamp, stamping wraps both
        .layer(axum::middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(|error: tower_http::classify::ServerErrorsFailureClass, latency: std::time::Duration, _span: &tracing::Span| {
                    tracing::error!(
                        error = ?error,
                        latency_ms = latency.as_millis(),
                        "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                        error,
                        latency.as_millis()
                    );
                }),
        )
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" PAGES:");
    info!("   • GET  /");
    info!("   • GET  /chat");
    info!("   • GET  /static/{{path}}");
    info!(" CHAT API:");
    info!("   • POST /api/chat/send");
    info!("   • GET  /api/chat/questions");
    info!("   • GET  /api/chat/history/{{user_id}}");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
