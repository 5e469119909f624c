//! Server Configuration
//!
//! Everything the composition root reads from the environment, pulled
//! into one struct at startup. `NODE_ENV=production` is the switch
//! that hardens the derived per-crate configs (Secure cookies, fail
//! closed on store outage, no upstream error detail).

use std::path::PathBuf;

use auth::AuthConfig;
use relay::RelayConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port
    pub port: u16,
    /// `NODE_ENV == "production"`
    pub production: bool,
    /// Redis connection URL, derived from REDIS_HOST/PORT/PASSWORD;
    /// `None` selects the in-memory store
    pub redis_url: Option<String>,
    /// Packaged docs directory (may be read-only at runtime)
    pub docs_dir: PathBuf,
    /// Writable overlay for new versions
    pub docs_write_dir: PathBuf,
    /// Upstream docs API base URL
    pub upstream_url: String,
    /// Server-side API key for the relay
    pub doc_log_api_key: Option<String>,
    /// Allowed CORS origins
    pub frontend_origins: Vec<String>,
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// `from_env` is a thin wrapper over this; tests inject a map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = setting(&lookup, "NODE_ENV").is_some_and(|v| v == "production");

        let port = setting(&lookup, "PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(3001);

        let redis_url = setting(&lookup, "REDIS_HOST").map(|host| {
            let port = setting(&lookup, "REDIS_PORT").unwrap_or_else(|| "6379".to_string());
            match lookup("REDIS_PASSWORD").filter(|v| !v.is_empty()) {
                Some(password) => format!("redis://:{password}@{host}:{port}"),
                None => format!("redis://{host}:{port}"),
            }
        });

        let docs_dir = setting(&lookup, "DOCS_DIR").unwrap_or_else(|| "content/docs".to_string());
        let docs_write_dir = setting(&lookup, "DOCS_WRITE_DIR").unwrap_or_else(|| docs_dir.clone());

        let upstream_url =
            setting(&lookup, "FASTAPI_URL").unwrap_or_else(|| "http://localhost:8000".to_string());

        let frontend_origins = setting(&lookup, "FRONTEND_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            port,
            production,
            redis_url,
            docs_dir: PathBuf::from(docs_dir),
            docs_write_dir: PathBuf::from(docs_write_dir),
            upstream_url,
            doc_log_api_key: setting(&lookup, "DOC_LOG_API_KEY"),
            frontend_origins,
        }
    }

    /// Auth config for this deployment environment
    pub fn auth_config(&self) -> AuthConfig {
        if self.production {
            AuthConfig::default()
        } else {
            AuthConfig::development()
        }
    }

    /// Relay config for this deployment environment
    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            upstream_base: self.upstream_url.clone(),
            api_key: self.doc_log_api_key.clone(),
            expose_upstream_errors: !self.production,
            ..RelayConfig::default()
        }
    }
}

/// Read a trimmed, non-empty setting
fn setting<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a HashMap<&'a str, String>) -> impl Fn(&str) -> Option<String> + 'a {
        |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let vars = HashMap::new();
        let config = AppConfig::from_lookup(lookup(&vars));

        assert_eq!(config.port, 3001);
        assert!(!config.production);
        assert!(config.redis_url.is_none());
        assert_eq!(config.docs_dir, PathBuf::from("content/docs"));
        assert_eq!(config.docs_write_dir, config.docs_dir);
        assert_eq!(config.upstream_url, "http://localhost:8000");
        assert!(!config.frontend_origins.is_empty());
    }

    #[test]
    fn test_redis_url_variants() {
        let vars = HashMap::from([("REDIS_HOST", "cache.internal".to_string())]);
        let config = AppConfig::from_lookup(lookup(&vars));
        assert_eq!(
            config.redis_url.as_deref(),
            Some("redis://cache.internal:6379")
        );

        let vars = HashMap::from([
            ("REDIS_HOST", "cache.internal".to_string()),
            ("REDIS_PORT", "6380".to_string()),
            ("REDIS_PASSWORD", "hunter2".to_string()),
        ]);
        let config = AppConfig::from_lookup(lookup(&vars));
        assert_eq!(
            config.redis_url.as_deref(),
            Some("redis://:hunter2@cache.internal:6380")
        );
    }

    #[test]
    fn test_production_hardens_derived_configs() {
        let vars = HashMap::from([("NODE_ENV", "production".to_string())]);
        let config = AppConfig::from_lookup(lookup(&vars));
        assert!(config.production);

        let auth = config.auth_config();
        assert!(auth.cookie_secure);
        assert_eq!(auth.degraded_mode, auth::DegradedMode::FailClosed);

        let relay = config.relay_config();
        assert!(!relay.expose_upstream_errors);
    }

    #[test]
    fn test_development_relaxations() {
        let vars = HashMap::new();
        let config = AppConfig::from_lookup(lookup(&vars));

        let auth = config.auth_config();
        assert!(!auth.cookie_secure);
        assert_eq!(auth.degraded_mode, auth::DegradedMode::SyntheticAdmin);
        assert!(config.relay_config().expose_upstream_errors);
    }

    #[test]
    fn test_origins_split_and_trimmed() {
        let vars = HashMap::from([(
            "FRONTEND_ORIGINS",
            " https://admin.example.com , https://docs.example.com ".to_string(),
        )]);
        let config = AppConfig::from_lookup(lookup(&vars));
        assert_eq!(
            config.frontend_origins,
            vec![
                "https://admin.example.com".to_string(),
                "https://docs.example.com".to_string()
            ]
        );
    }

    #[test]
    fn test_relay_config_carries_api_key() {
        let vars = HashMap::from([
            ("DOC_LOG_API_KEY", "key-123".to_string()),
            ("FASTAPI_URL", "http://docs-api:8000".to_string()),
        ]);
        let config = AppConfig::from_lookup(lookup(&vars));

        let relay = config.relay_config();
        assert_eq!(relay.upstream_base, "http://docs-api:8000");
        assert_eq!(relay.api_key.as_deref(), Some("key-123"));
    }
}
