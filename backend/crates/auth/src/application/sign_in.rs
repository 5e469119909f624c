//! Sign In Use Case
//!
//! Verifies email/password against the configured user directory and
//! creates a session. Every rejection path except OAuth-only accounts
//! collapses into `InvalidCredentials` so responses never reveal
//! whether an email is known.

use std::net::IpAddr;
use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::user_directory::UserDirectory;
use crate::domain::entity::identity::Identity;
use crate::domain::entity::session::SessionRecord;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::email::Email;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Session token for the cookie
    pub token: SessionToken,
    /// Authenticated identity
    pub user: Identity,
}

/// Sign in use case
pub struct SignInUseCase<S>
where
    S: SessionRepository,
{
    sessions: Arc<S>,
    directory: Arc<UserDirectory>,
    config: Arc<AuthConfig>,
}

impl<S> SignInUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(sessions: Arc<S>, directory: Arc<UserDirectory>, config: Arc<AuthConfig>) -> Self {
        Self {
            sessions,
            directory,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        client_ip: Option<IpAddr>,
    ) -> AuthResult<SignInOutput> {
        // Malformed input reads the same as a wrong password
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .directory
            .find_by_email(email.as_str())
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = user.password_hash.as_ref().ok_or(AuthError::OAuthOnly)?;

        if !hash.verify(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        let identity = user.identity();
        let token = SessionToken::generate();
        let record = SessionRecord::new(identity.clone(), self.config.session_ttl);

        self.sessions
            .put_session(&token, &record, self.config.session_ttl)
            .await?;

        tracing::info!(
            user_id = %identity.id,
            client_ip = ?client_ip,
            "User signed in"
        );

        Ok(SignInOutput {
            token,
            user: identity,
        })
    }
}
