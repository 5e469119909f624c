//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are the
//! crates' own types funneled through `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router, http};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::domain::repository::{CacheRepository, SessionRepository};
use auth::{AuthConfig, AuthMiddlewareState, InMemoryStore, RedisStore, UserDirectory};
use config::AppConfig;
use docstore::FsVersionRepository;
use relay::RelayState;

/// Largest accepted request body (documents travel as JSON)
const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,docstore=info,relay=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    // Credential backend: environment-configured users, falling back to
    // the well-known development set outside production
    let directory = UserDirectory::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;
    let directory = if directory.is_empty() {
        if config.production {
            anyhow::bail!("no users configured; refusing to start in production");
        }
        tracing::info!("No users configured; using development accounts");
        UserDirectory::development().map_err(|e| anyhow::anyhow!("{e}"))?
    } else {
        directory
    };
    let directory = Arc::new(directory);

    let auth_config = config.auth_config();
    let docs_repo = FsVersionRepository::new(&config.docs_dir, &config.docs_write_dir);
    let relay_state = RelayState::new(config.relay_config())?;

    // Session/cache store: Redis when configured, in-memory otherwise
    let app = match &config.redis_url {
        Some(url) => {
            let store = RedisStore::connect(url).await?;
            tracing::info!("Connected to Redis");
            build_app(store, directory, auth_config, docs_repo, relay_state)
        }
        None => {
            tracing::warn!("REDIS_HOST not set; sessions are in-memory and lost on restart");
            build_app(
                InMemoryStore::new(),
                directory,
                auth_config,
                docs_repo,
                relay_state,
            )
        }
    };

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Assemble the full router over any session/cache store
fn build_app<S>(
    store: S,
    directory: Arc<UserDirectory>,
    auth_config: AuthConfig,
    docs_repo: FsVersionRepository,
    relay_state: RelayState,
) -> Router
where
    S: SessionRepository + CacheRepository + Clone + Send + Sync + 'static,
{
    let middleware_state = AuthMiddlewareState {
        store: Arc::new(store.clone()),
        directory: directory.clone(),
        config: Arc::new(auth_config.clone()),
    };

    // Admin surface: identity resolution first, then the CSRF
    // double-submit check on mutating methods
    let docs = docstore::docs_router(docs_repo)
        .layer(axum::middleware::from_fn(auth::csrf_guard))
        .layer(axum::middleware::from_fn(
            move |req: http::Request<axum::body::Body>, next: Next| {
                let state = middleware_state.clone();
                async move { auth::require_admin(state, req, next).await }
            },
        ));

    Router::new()
        .route("/health", get(health))
        .nest(
            "/api",
            auth::auth_router_generic(store.clone(), directory, auth_config)
                .merge(auth::cache_router_generic(store)),
        )
        .nest("/api/admin/docs", docs)
        .nest("/api/proxy", relay::relay_router(relay_state))
        .layer(axum::middleware::from_fn(security_headers))
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Security headers on every response; admin responses additionally
/// forbid caching
async fn security_headers(req: http::Request<axum::body::Body>, next: Next) -> Response {
    let admin_path = req.uri().path().starts_with("/api/admin");

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    if admin_path {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    }

    response
}

/// CORS configuration
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            http::HeaderName::from_static("x-csrf-token"),
            http::HeaderName::from_static("x-user-id"),
            http::HeaderName::from_static("x-user-email"),
        ]))
        .allow_credentials(true)
}
