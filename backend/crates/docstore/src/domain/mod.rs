//! Domain Layer
//!
//! Entities, value objects, and the repository trait.

pub mod entity;
pub mod repository;
pub mod value_object;
