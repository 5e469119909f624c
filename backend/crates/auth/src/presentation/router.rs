//! Auth Router
//!
//! Two routers, both with paths relative to the `/api` mount point:
//! [`auth_router`] carries the CSRF and session/login routes and
//! [`cache_router`] the generic cache routes (with the CSRF guard
//! layered on its mutating methods).

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::user_directory::UserDirectory;
use crate::domain::repository::{CacheRepository, SessionRepository};
use crate::infra::redis::RedisStore;
use crate::presentation::handlers::{self, AuthAppState, CacheAppState};

/// Create the auth router with the Redis store
pub fn auth_router(store: RedisStore, directory: Arc<UserDirectory>, config: AuthConfig) -> Router {
    auth_router_generic(store, directory, config)
}

/// Create a generic auth router for any session repository
pub fn auth_router_generic<R>(store: R, directory: Arc<UserDirectory>, config: AuthConfig) -> Router
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        store: Arc::new(store),
        directory,
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/csrf",
            get(handlers::issue_csrf_token::<R>).post(handlers::validate_csrf_token::<R>),
        )
        .route(
            "/auth/simple-session",
            get(handlers::session_status::<R>).delete(handlers::sign_out::<R>),
        )
        .route("/auth/passport/login", post(handlers::login::<R>))
        .with_state(state)
}

/// Create the cache router with the Redis store
pub fn cache_router(store: RedisStore) -> Router {
    cache_router_generic(store)
}

/// Create a generic cache router for any cache repository
pub fn cache_router_generic<C>(store: C) -> Router
where
    C: CacheRepository + Clone + Send + Sync + 'static,
{
    let state = CacheAppState {
        store: Arc::new(store),
    };

    Router::new()
        .route(
            "/redis/cache",
            get(handlers::cache_get::<C>)
                .post(handlers::cache_set::<C>)
                .delete(handlers::cache_delete::<C>),
        )
        .layer(middleware::from_fn(super::middleware::csrf_guard))
        .with_state(state)
}
