//! Header Filtering
//!
//! Hop-by-hop headers describe the inbound connection and must not be
//! replayed upstream (RFC 9110 §7.6.1); `Host` and `Content-Length`
//! are rewritten by the client library. Strict mode inverts the rule:
//! only a known-good allowlist travels.

use axum::http::{HeaderMap, header};

/// Connection-scoped headers, dropped in both directions
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Headers allowed through in strict mode
const STRICT_ALLOWED: &[&str] = &[
    "accept",
    "accept-language",
    "content-type",
    "cookie",
    "authorization",
    "x-api-key",
    "x-csrf-token",
    "x-user-id",
    "x-user-email",
];

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.iter().any(|h| name.eq_ignore_ascii_case(h))
}

/// Filter inbound headers for the upstream request
pub fn filter_request_headers(headers: &HeaderMap, strict: bool) -> HeaderMap {
    let mut out = HeaderMap::new();

    for (name, value) in headers {
        let keep = if strict {
            STRICT_ALLOWED
                .iter()
                .any(|h| name.as_str().eq_ignore_ascii_case(h))
        } else {
            !is_hop_by_hop(name.as_str())
                && name != header::HOST
                && name != header::CONTENT_LENGTH
        };

        if keep {
            out.append(name.clone(), value.clone());
        }
    }

    out
}

/// Filter upstream response headers before relaying them back.
///
/// The body is re-framed by the server, so length/encoding framing
/// headers go too.
pub fn filter_response_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();

    for (name, value) in headers {
        if !is_hop_by_hop(name.as_str()) && name != header::CONTENT_LENGTH {
            out.append(name.clone(), value.clone());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(raw: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in raw {
            map.append(
                axum::http::header::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_request_filter_strips_hop_by_hop_and_host() {
        let filtered = filter_request_headers(
            &headers(&[
                ("host", "example.com"),
                ("connection", "keep-alive"),
                ("transfer-encoding", "chunked"),
                ("content-length", "42"),
                ("content-type", "application/json"),
                ("cookie", "admin-session=abc"),
                ("x-custom", "survives"),
            ]),
            false,
        );

        assert!(filtered.get("host").is_none());
        assert!(filtered.get("connection").is_none());
        assert!(filtered.get("transfer-encoding").is_none());
        assert!(filtered.get("content-length").is_none());
        assert_eq!(filtered.get("content-type").unwrap(), "application/json");
        assert_eq!(filtered.get("cookie").unwrap(), "admin-session=abc");
        assert_eq!(filtered.get("x-custom").unwrap(), "survives");
    }

    #[test]
    fn test_strict_mode_forwards_only_allowlist() {
        let filtered = filter_request_headers(
            &headers(&[
                ("accept", "application/json"),
                ("cookie", "a=b"),
                ("x-api-key", "key"),
                ("x-user-email", "a@b.c"),
                ("x-custom", "dropped"),
                ("referer", "https://evil.example"),
            ]),
            true,
        );

        assert_eq!(filtered.len(), 4);
        assert!(filtered.get("x-custom").is_none());
        assert!(filtered.get("referer").is_none());
        assert!(filtered.get("x-api-key").is_some());
    }

    #[test]
    fn test_response_filter() {
        let filtered = filter_response_headers(&headers(&[
            ("content-type", "application/json"),
            ("content-length", "10"),
            ("connection", "close"),
            ("x-request-id", "abc"),
        ]));

        assert_eq!(filtered.get("content-type").unwrap(), "application/json");
        assert_eq!(filtered.get("x-request-id").unwrap(), "abc");
        assert!(filtered.get("content-length").is_none());
        assert!(filtered.get("connection").is_none());
    }

    #[test]
    fn test_multi_valued_headers_survive() {
        let mut map = HeaderMap::new();
        map.append("set-cookie", HeaderValue::from_static("a=1"));
        map.append("set-cookie", HeaderValue::from_static("b=2"));

        let filtered = filter_response_headers(&map);
        assert_eq!(filtered.get_all("set-cookie").iter().count(), 2);
    }
}
