//! Identity Resolution
//!
//! Protected routes accept more than one way of proving who the caller
//! is. Resolution strategies run in a fixed order and the first one
//! that produces an identity wins:
//!
//! 1. [`SessionTokenResolver`] - the `admin-session` cookie, checked
//!    against the session store
//! 2. [`TrustedHeaderResolver`] - `X-User-Id` / `X-User-Email` headers
//!    injected by an authenticating gateway
//!
//! A resolver returning `Ok(None)` means "this request is not mine",
//! and the next strategy gets its turn. Errors abort resolution.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::cookie::extract_cookie;

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::application::user_directory::UserDirectory;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::user_role::Role;
use crate::error::{AuthError, AuthResult};

/// Gateway-injected user id header
pub const USER_ID_HEADER: &str = "x-user-id";
/// Gateway-injected user email header
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// One identity resolution strategy
#[trait_variant::make(IdentityResolver: Send)]
pub trait LocalIdentityResolver {
    /// Attempt to resolve an identity; `Ok(None)` means "not mine"
    async fn resolve(&self, headers: &HeaderMap) -> AuthResult<Option<Identity>>;
}

/// Resolves identity from the session cookie
pub struct SessionTokenResolver<S>
where
    S: SessionRepository,
{
    check_session: CheckSessionUseCase<S>,
    config: Arc<AuthConfig>,
}

impl<S> SessionTokenResolver<S>
where
    S: SessionRepository,
{
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            check_session: CheckSessionUseCase::new(sessions, config.clone()),
            config,
        }
    }
}

impl<S> IdentityResolver for SessionTokenResolver<S>
where
    S: SessionRepository + Sync,
{
    async fn resolve(&self, headers: &HeaderMap) -> AuthResult<Option<Identity>> {
        let Some(raw) = extract_cookie(headers, &self.config.session_cookie_name) else {
            return Ok(None);
        };

        match self.check_session.get_session(&raw).await {
            Ok(record) => Ok(Some(record.user)),
            // An absent or dead session is not an error here; the next
            // strategy may still identify the caller.
            Err(AuthError::SessionInvalid) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Resolves identity from gateway-injected headers.
///
/// Both headers must be present. The claimed email is matched against
/// the configured user directory to pick up the role and display name;
/// unknown emails resolve as plain users.
pub struct TrustedHeaderResolver {
    directory: Arc<UserDirectory>,
}

impl TrustedHeaderResolver {
    pub fn new(directory: Arc<UserDirectory>) -> Self {
        Self { directory }
    }
}

impl IdentityResolver for TrustedHeaderResolver {
    async fn resolve(&self, headers: &HeaderMap) -> AuthResult<Option<Identity>> {
        let user_id = header_str(headers, USER_ID_HEADER);
        let email = header_str(headers, USER_EMAIL_HEADER);

        let (Some(user_id), Some(email)) = (user_id, email) else {
            return Ok(None);
        };

        let identity = match self.directory.find_by_email(email) {
            Some(user) => Identity {
                id: user_id.to_string(),
                email: user.email.clone(),
                name: user.name.clone(),
                role: user.role,
            },
            None => Identity {
                id: user_id.to_string(),
                email: email.to_string(),
                name: email.split('@').next().unwrap_or(email).to_string(),
                role: Role::User,
            },
        };

        Ok(Some(identity))
    }
}

/// Runs the resolution strategies in order
pub struct ResolveIdentityUseCase<S>
where
    S: SessionRepository,
{
    session: SessionTokenResolver<S>,
    fallback: TrustedHeaderResolver,
}

impl<S> ResolveIdentityUseCase<S>
where
    S: SessionRepository + Sync,
{
    pub fn new(sessions: Arc<S>, directory: Arc<UserDirectory>, config: Arc<AuthConfig>) -> Self {
        Self {
            session: SessionTokenResolver::new(sessions, config),
            fallback: TrustedHeaderResolver::new(directory),
        }
    }

    /// First strategy to produce an identity wins
    pub async fn resolve(&self, headers: &HeaderMap) -> AuthResult<Option<Identity>> {
        // Both resolver trait flavors are in scope here; name the Send one
        if let Some(identity) = IdentityResolver::resolve(&self.session, headers).await? {
            return Ok(Some(identity));
        }
        IdentityResolver::resolve(&self.fallback, headers).await
    }

    /// Resolve and require the admin role
    pub async fn require_admin(&self, headers: &HeaderMap) -> AuthResult<Identity> {
        let identity = self
            .resolve(headers)
            .await?
            .ok_or(AuthError::NotAuthenticated)?;

        if !identity.is_admin() {
            return Err(AuthError::AdminRequired);
        }

        Ok(identity)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
