//! HTTP Handlers

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::client::extract_client_ip;
use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::csrf::{CSRF_COOKIE_NAME, CSRF_HEADER_NAME, mint_csrf_token, validate_csrf};
use crate::application::user_directory::UserDirectory;
use crate::application::{
    CacheUseCase, CheckSessionUseCase, ResolveIdentityUseCase, SignInInput, SignInUseCase,
    SignOutUseCase,
};
use crate::domain::repository::{CacheRepository, SessionRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CacheKeyQuery, CacheSetRequest, CacheValueResponse, CsrfTokenResponse, CsrfValidateResponse,
    LoginRequest, LoginResponse, OkResponse, SessionStatusResponse,
};

/// Shared state for session/login/CSRF handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub store: Arc<R>,
    pub directory: Arc<UserDirectory>,
    pub config: Arc<AuthConfig>,
}

/// Shared state for cache handlers
#[derive(Clone)]
pub struct CacheAppState<C>
where
    C: CacheRepository + Clone + Send + Sync + 'static,
{
    pub store: Arc<C>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/passport/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AuthError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let client_ip = extract_client_ip(&headers, None);

    let use_case = SignInUseCase::new(
        state.store.clone(),
        state.directory.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input, client_ip).await?;

    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(output.token.as_str());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            success: true,
            user: output.user,
        }),
    ))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/simple-session
///
/// Introspection, not a guard: an absent or dead session answers 200
/// with `authenticated: false` (plus a delete-cookie header when the
/// cookie turned out to be stale). 401s are the admin middleware's job.
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let Some(raw) = extract_cookie(&headers, &state.config.session_cookie_name) else {
        return Ok(Json(SessionStatusResponse::anonymous()).into_response());
    };

    let use_case = CheckSessionUseCase::new(state.store.clone(), state.config.clone());

    match use_case.get_session(&raw).await {
        Ok(record) => Ok(Json(SessionStatusResponse::authenticated(record.user)).into_response()),
        Err(AuthError::SessionInvalid) => {
            let cookie = state.config.session_cookie().build_delete_cookie();
            Ok((
                [(header::SET_COOKIE, cookie)],
                Json(SessionStatusResponse::anonymous()),
            )
                .into_response())
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Sign Out
// ============================================================================

/// DELETE /api/auth/simple-session
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.store.clone());
        // Ignore errors - the cookie is cleared either way
        let _ = use_case.execute(&token).await;
    }

    let cookie = state.config.session_cookie().build_delete_cookie();

    Ok(([(header::SET_COOKIE, cookie)], Json(OkResponse::ok())))
}

// ============================================================================
// CSRF
// ============================================================================

/// GET /api/csrf
pub async fn issue_csrf_token<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<impl IntoResponse>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let token = mint_csrf_token();
    let cookie = state.config.csrf_cookie().build_set_cookie(&token);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(CsrfTokenResponse { csrf_token: token }),
    ))
}

/// POST /api/csrf
///
/// Privileged validation endpoint: requires a resolved admin identity
/// before the double-submit pair is even looked at.
pub async fn validate_csrf_token<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<CsrfValidateResponse>>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let resolver = ResolveIdentityUseCase::new(
        state.store.clone(),
        state.directory.clone(),
        state.config.clone(),
    );
    resolver.require_admin(&headers).await?;

    let header_token = headers.get(CSRF_HEADER_NAME).and_then(|v| v.to_str().ok());
    let cookie_token = extract_cookie(&headers, CSRF_COOKIE_NAME);

    if !validate_csrf(header_token, cookie_token.as_deref()) {
        return Err(AuthError::CsrfMismatch);
    }

    Ok(Json(CsrfValidateResponse { valid: true }))
}

// ============================================================================
// Cache
// ============================================================================

/// GET /api/redis/cache?key=...
pub async fn cache_get<C>(
    State(state): State<CacheAppState<C>>,
    Query(query): Query<CacheKeyQuery>,
) -> AuthResult<Json<CacheValueResponse>>
where
    C: CacheRepository + Clone + Send + Sync + 'static,
{
    let use_case = CacheUseCase::new(state.store.clone());
    let raw = use_case.get(&query.key).await?;

    let value = serde_json::from_str(&raw)
        .map_err(|e| AuthError::Internal(format!("Stored cache value is not JSON: {e}")))?;

    Ok(Json(CacheValueResponse {
        success: true,
        value,
    }))
}

/// POST /api/redis/cache
pub async fn cache_set<C>(
    State(state): State<CacheAppState<C>>,
    Json(req): Json<CacheSetRequest>,
) -> AuthResult<Json<OkResponse>>
where
    C: CacheRepository + Clone + Send + Sync + 'static,
{
    let payload = serde_json::to_string(&req.value)
        .map_err(|e| AuthError::Internal(format!("Failed to serialize cache value: {e}")))?;

    let use_case = CacheUseCase::new(state.store.clone());
    use_case.set(&req.key, &payload, req.ttl).await?;

    Ok(Json(OkResponse::ok()))
}

/// DELETE /api/redis/cache?key=...
pub async fn cache_delete<C>(
    State(state): State<CacheAppState<C>>,
    Query(query): Query<CacheKeyQuery>,
) -> AuthResult<Json<OkResponse>>
where
    C: CacheRepository + Clone + Send + Sync + 'static,
{
    let use_case = CacheUseCase::new(state.store.clone());
    // Deleting an absent key is fine; the endpoint is idempotent
    let _ = use_case.delete(&query.key).await?;

    Ok(Json(OkResponse::ok()))
}
