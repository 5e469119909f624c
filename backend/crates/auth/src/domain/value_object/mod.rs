//! Value Object Module

pub mod cache_key;
pub mod email;
pub mod session_token;
pub mod user_role;
