//! Auth Middleware
//!
//! Route guards for admin-only surfaces and CSRF-protected mutations.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::csrf::{CSRF_COOKIE_NAME, CSRF_HEADER_NAME, requires_csrf, validate_csrf};
use crate::application::resolve_identity::ResolveIdentityUseCase;
use crate::application::user_directory::UserDirectory;
use crate::domain::repository::SessionRepository;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub store: Arc<R>,
    pub directory: Arc<UserDirectory>,
    pub config: Arc<AuthConfig>,
}

/// Middleware that requires a resolved admin identity.
///
/// Runs the resolver chain (session cookie, then trusted headers); no
/// identity is a 401, a non-admin identity a 403. The resolved
/// [`Identity`](crate::domain::entity::identity::Identity) is inserted
/// into request extensions for downstream handlers.
pub async fn require_admin<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let resolver = ResolveIdentityUseCase::new(
        state.store.clone(),
        state.directory.clone(),
        state.config.clone(),
    );

    let identity = match resolver.require_admin(req.headers()).await {
        Ok(identity) => identity,
        Err(e) => return Err(e.into_response()),
    };

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Middleware enforcing the CSRF double-submit check on mutating
/// methods. GET/HEAD/OPTIONS pass through untouched; everything else
/// is rejected before the handler body runs unless the `X-CSRF-Token`
/// header and the `_csrf` cookie agree.
pub async fn csrf_guard(req: Request<Body>, next: Next) -> Result<Response, Response> {
    if requires_csrf(req.method()) {
        let headers = req.headers();
        let header_token = headers.get(CSRF_HEADER_NAME).and_then(|v| v.to_str().ok());
        let cookie_token = extract_cookie(headers, CSRF_COOKIE_NAME);

        if !validate_csrf(header_token, cookie_token.as_deref()) {
            return Err(AuthError::CsrfMismatch.into_response());
        }
    }

    Ok(next.run(req).await)
}
