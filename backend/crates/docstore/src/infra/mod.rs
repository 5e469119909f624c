//! Infrastructure Layer

pub mod fs;
