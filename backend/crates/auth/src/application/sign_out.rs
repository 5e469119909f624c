//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    sessions: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(sessions: Arc<S>) -> Self {
        Self { sessions }
    }

    /// Delete the session behind a raw cookie value.
    ///
    /// Callers clear the cookie regardless of the outcome; a malformed
    /// token just means there is nothing to delete.
    pub async fn execute(&self, raw_token: &str) -> AuthResult<()> {
        let token = SessionToken::parse(raw_token).map_err(|_| AuthError::SessionInvalid)?;

        if let Err(e) = self.sessions.delete_session(&token).await {
            tracing::warn!(error = %e, "Failed to delete session on sign-out");
            return Err(e);
        }

        tracing::info!("User signed out");
        Ok(())
    }
}
