//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;

use crate::application::csrf::CSRF_COOKIE_NAME;

/// Behavior when the session store is unreachable.
///
/// Production always fails closed. `SyntheticAdmin` exists for local
/// development where Redis may not be running: session checks succeed
/// with a synthetic admin identity and a warning is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedMode {
    /// Store errors surface as errors; nobody is authenticated
    FailClosed,
    /// Store errors yield a synthetic admin identity (development only)
    SyntheticAdmin,
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session TTL (24 hours)
    pub session_ttl: Duration,
    /// CSRF token TTL (1 hour)
    pub csrf_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// What to do when the session store is unreachable
    pub degraded_mode: DegradedMode,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "admin-session".to_string(),
            session_ttl: Duration::from_secs(24 * 3600), // 24 hours
            csrf_ttl: Duration::from_secs(3600),         // 1 hour
            cookie_secure: true,
            degraded_mode: DegradedMode::FailClosed,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie, fail-open store)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            degraded_mode: DegradedMode::SyntheticAdmin,
            ..Default::default()
        }
    }

    /// Cookie settings for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig::strict_http_only(&self.session_cookie_name, self.session_ttl.as_secs() as i64)
            .with_secure(self.cookie_secure)
    }

    /// Cookie settings for the CSRF cookie
    pub fn csrf_cookie(&self) -> CookieConfig {
        CookieConfig::strict_http_only(CSRF_COOKIE_NAME, self.csrf_ttl.as_secs() as i64)
            .with_secure(self.cookie_secure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_production_safe() {
        let config = AuthConfig::default();
        assert!(config.cookie_secure);
        assert_eq!(config.degraded_mode, DegradedMode::FailClosed);
        assert_eq!(config.session_cookie_name, "admin-session");
        assert_eq!(config.session_ttl, Duration::from_secs(86400));
        assert_eq!(config.csrf_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_development_relaxations() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        assert_eq!(config.degraded_mode, DegradedMode::SyntheticAdmin);
    }

    #[test]
    fn test_cookie_builders() {
        let config = AuthConfig::default();
        let header = config.session_cookie().build_set_cookie("abc");
        assert!(header.starts_with("admin-session=abc;"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("Secure"));
        assert!(header.contains("SameSite=Strict"));
        assert!(header.contains("Max-Age=86400"));

        let csrf = config.csrf_cookie().build_set_cookie("tok");
        assert!(csrf.starts_with("_csrf=tok;"));
        assert!(csrf.contains("Max-Age=3600"));
    }
}
