//! Request Forwarding

use axum::Json;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};
use crate::headers::{filter_request_headers, filter_response_headers};

/// Largest inbound body the relay will buffer (10 MiB)
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

const API_KEY_HEADER: &str = "x-api-key";

/// Shared state for the relay
#[derive(Clone)]
pub struct RelayState {
    pub client: reqwest::Client,
    pub config: Arc<RelayConfig>,
}

impl RelayState {
    /// Build the state with a client honoring the configured timeout
    pub fn new(config: RelayConfig) -> RelayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }
}

/// Create the relay router: a single fallback so every method and path
/// under the mount point forwards
pub fn relay_router(state: RelayState) -> axum::Router {
    axum::Router::new().fallback(forward).with_state(state)
}

/// Forward one request, converting any failure into the generic 500
async fn forward(State(state): State<RelayState>, req: Request) -> Response {
    match proxy(&state, req).await {
        Ok(response) => response,
        Err(e) => {
            e.log();
            let message = if state.config.expose_upstream_errors {
                format!("Upstream request failed: {}", e.detail())
            } else {
                "Upstream request failed".to_string()
            };
            (e.status_code(), Json(json!({ "error": message }))).into_response()
        }
    }
}

/// Methods the relay forwards; anything else is refused
fn forwardable(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET
            | Method::HEAD
            | Method::POST
            | Method::PUT
            | Method::PATCH
            | Method::DELETE
            | Method::OPTIONS
    )
}

/// Join the upstream base with the inbound path and query
fn upstream_url(config: &RelayConfig, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}{}", config.upstream_base.trim_end_matches('/'), path);
    if config.forward_query {
        if let Some(query) = query {
            url.push('?');
            url.push_str(query);
        }
    }
    url
}

async fn proxy(state: &RelayState, req: Request) -> RelayResult<Response> {
    let config = &state.config;

    let method = req.method().clone();
    if !forwardable(&method) {
        return Err(RelayError::Method(method.to_string()));
    }

    let (parts, body) = req.into_parts();
    let url = upstream_url(config, parts.uri.path(), parts.uri.query());

    let mut headers = filter_request_headers(&parts.headers, config.strict_headers);
    if let Some(key) = &config.api_key {
        // Never override a caller-supplied key
        if !headers.contains_key(API_KEY_HEADER) {
            let value = HeaderValue::from_str(key)
                .map_err(|_| RelayError::Internal("Configured API key is not a valid header value".to_string()))?;
            headers.insert(API_KEY_HEADER, value);
        }
    }

    let body = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| RelayError::Body(e.to_string()))?;

    tracing::debug!(method = %method, url = %url, "Forwarding request upstream");

    let upstream = state
        .client
        .request(method, &url)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let response_headers = filter_response_headers(upstream.headers());
    let bytes = upstream.bytes().await?;

    let mut builder = Response::builder().status(status);
    if let Some(headers) = builder.headers_mut() {
        *headers = response_headers;
    }
    builder
        .body(Body::from(bytes))
        .map_err(|e| RelayError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[test]
    fn test_forwardable_methods() {
        assert!(forwardable(&Method::GET));
        assert!(forwardable(&Method::POST));
        assert!(forwardable(&Method::DELETE));
        assert!(forwardable(&Method::OPTIONS));
        assert!(!forwardable(&Method::TRACE));
        assert!(!forwardable(&Method::CONNECT));
    }

    #[test]
    fn test_upstream_url_joins_path_and_query() {
        let config = RelayConfig {
            upstream_base: "http://upstream:8000/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            upstream_url(&config, "/docs/log", Some("page=2")),
            "http://upstream:8000/docs/log?page=2"
        );
        assert_eq!(
            upstream_url(&config, "/docs/log", None),
            "http://upstream:8000/docs/log"
        );
    }

    #[test]
    fn test_upstream_url_ignores_query_when_disabled() {
        let config = RelayConfig {
            upstream_base: "http://upstream:8000".to_string(),
            forward_query: false,
            ..Default::default()
        };
        assert_eq!(
            upstream_url(&config, "/docs", Some("secret=1")),
            "http://upstream:8000/docs"
        );
    }

    #[tokio::test]
    async fn test_unforwardable_method_is_generic_500() {
        // TRACE is refused before any network I/O happens, so this
        // needs no live upstream
        let state = RelayState::new(RelayConfig::default()).unwrap();
        let app = relay_router(state);

        let req = axum::http::Request::builder()
            .method("TRACE")
            .uri("/anything")
            .body(Body::empty())
            .unwrap();

        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Upstream request failed");
    }

    #[tokio::test]
    async fn test_exposed_errors_carry_detail() {
        let state = RelayState::new(RelayConfig::development()).unwrap();
        let app = relay_router(state);

        let req = axum::http::Request::builder()
            .method("TRACE")
            .uri("/anything")
            .body(Body::empty())
            .unwrap();

        let res = app.oneshot(req).await.unwrap();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("TRACE")
        );
    }
}
