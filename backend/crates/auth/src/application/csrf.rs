//! CSRF Double-Submit Tokens
//!
//! The token travels twice: once in an HttpOnly cookie and once in a
//! request header the frontend copies from `POST /api/csrf`'s response
//! body. A cross-site attacker can force the cookie to be sent but
//! cannot read it to fill in the header, so agreement between the two
//! proves same-origin.

use axum::http::Method;
use platform::crypto::{constant_time_eq, token_hex};

/// Cookie half of the double-submit pair
pub const CSRF_COOKIE_NAME: &str = "_csrf";
/// Header half of the double-submit pair
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";

/// Mint a fresh CSRF token (32 bytes of entropy, hex-encoded)
pub fn mint_csrf_token() -> String {
    token_hex(32)
}

/// Double-submit check: header and cookie must both be present and match
pub fn validate_csrf(header: Option<&str>, cookie: Option<&str>) -> bool {
    match (header, cookie) {
        (Some(h), Some(c)) => constant_time_eq(h.as_bytes(), c.as_bytes()),
        _ => false,
    }
}

/// Safe methods skip CSRF validation
pub fn requires_csrf(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_format() {
        let token = mint_csrf_token();
        assert_eq!(token.len(), 64);
        assert!(token.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        assert_ne!(token, mint_csrf_token());
    }

    #[test]
    fn test_validate_matching() {
        let token = mint_csrf_token();
        assert!(validate_csrf(Some(&token), Some(&token)));
    }

    #[test]
    fn test_validate_rejects_mismatch_and_absence() {
        let token = mint_csrf_token();
        let other = mint_csrf_token();
        assert!(!validate_csrf(Some(&token), Some(&other)));
        assert!(!validate_csrf(Some(&token), None));
        assert!(!validate_csrf(None, Some(&token)));
        assert!(!validate_csrf(None, None));
        // Prefix of the right token is still wrong
        assert!(!validate_csrf(Some(&token[..32]), Some(&token)));
    }

    #[test]
    fn test_requires_csrf_by_method() {
        assert!(!requires_csrf(&Method::GET));
        assert!(!requires_csrf(&Method::HEAD));
        assert!(!requires_csrf(&Method::OPTIONS));
        assert!(requires_csrf(&Method::POST));
        assert!(requires_csrf(&Method::PUT));
        assert!(requires_csrf(&Method::PATCH));
        assert!(requires_csrf(&Method::DELETE));
    }
}
