//! Relay (Upstream Proxy) Backend Module
//!
//! Forwards inbound requests verbatim to the upstream docs API:
//! method, filtered headers, cookies, query string, and body travel as
//! received; the upstream's status, headers, and body come back
//! unmodified. The only additions are an optional server-side
//! `X-API-Key` (never overriding a caller-supplied one) and the
//! removal of hop-by-hop headers in both directions.
//!
//! Failure policy: any upstream or transport error is a generic 500;
//! detail is logged server-side and surfaced to the client only when
//! the deployment opts in (non-production debugging).

pub mod config;
pub mod error;
pub mod forward;
pub mod headers;

// Re-exports for convenience
pub use config::RelayConfig;
pub use error::{RelayError, RelayResult};
pub use forward::{RelayState, relay_router};
