//! Entities

pub mod version;
