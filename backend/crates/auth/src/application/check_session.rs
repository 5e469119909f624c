//! Check Session Use Case
//!
//! Verifies and retrieves session information.

use std::sync::Arc;

use crate::application::config::{AuthConfig, DegradedMode};
use crate::domain::entity::identity::Identity;
use crate::domain::entity::session::SessionRecord;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { sessions, config }
    }

    /// Just check if session is valid (returns bool)
    pub async fn is_valid(&self, raw_token: &str) -> bool {
        self.get_session(raw_token).await.is_ok()
    }

    /// Resolve a raw cookie value into a live session record.
    ///
    /// The token format is checked before the store is touched, so a
    /// garbage cookie never costs a round trip.
    pub async fn get_session(&self, raw_token: &str) -> AuthResult<SessionRecord> {
        let token = SessionToken::parse(raw_token).map_err(|_| AuthError::SessionInvalid)?;

        let record = match self.sessions.get_session(&token).await {
            Ok(record) => record,
            Err(e) => return self.degrade(e),
        };

        let record = record.ok_or(AuthError::SessionInvalid)?;

        if record.is_expired() {
            // Stale entry the store TTL has not reaped yet; best-effort cleanup
            if let Err(e) = self.sessions.delete_session(&token).await {
                tracing::debug!(error = %e, "Failed to delete expired session");
            }
            return Err(AuthError::SessionInvalid);
        }

        Ok(record)
    }

    /// Apply the configured policy for an unreachable session store
    fn degrade(&self, error: AuthError) -> AuthResult<SessionRecord> {
        match self.config.degraded_mode {
            DegradedMode::FailClosed => Err(error),
            DegradedMode::SyntheticAdmin => {
                tracing::warn!(
                    error = %error,
                    "Session store unreachable; continuing with synthetic admin identity"
                );
                Ok(SessionRecord::new(
                    Identity::synthetic_admin(),
                    self.config.session_ttl,
                ))
            }
        }
    }
}
