//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, hex/Base64, constant-time compare)
//! - Password verification (bcrypt)
//! - Cookie management
//! - Client identification helpers

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
