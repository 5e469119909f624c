//! Relay Configuration

use std::fmt;
use std::time::Duration;

/// Relay configuration
#[derive(Clone)]
pub struct RelayConfig {
    /// Upstream base URL, e.g. `http://localhost:8000`
    pub upstream_base: String,
    /// Server-side API key appended as `X-API-Key` when the caller
    /// did not supply one
    pub api_key: Option<String>,
    /// Forward the inbound query string
    pub forward_query: bool,
    /// Strict mode forwards only an allowlist of headers instead of
    /// everything minus hop-by-hop
    pub strict_headers: bool,
    /// Include upstream error detail in 500 bodies (development only)
    pub expose_upstream_errors: bool,
    /// Upstream request timeout
    pub timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream_base: "http://localhost:8000".to_string(),
            api_key: None,
            forward_query: true,
            strict_headers: false,
            expose_upstream_errors: false,
            timeout: Duration::from_secs(30),
        }
    }
}

impl RelayConfig {
    /// Create config for development (error detail exposed)
    pub fn development() -> Self {
        Self {
            expose_upstream_errors: true,
            ..Default::default()
        }
    }
}

// The API key is a credential; keep it out of logs.
impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("upstream_base", &self.upstream_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("forward_query", &self.forward_query)
            .field("strict_headers", &self.strict_headers)
            .field("expose_upstream_errors", &self.expose_upstream_errors)
            .field("timeout", &self.timeout)
            .finish()
    }
}
