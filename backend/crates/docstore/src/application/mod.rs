//! Application Layer
//!
//! Use cases. Each parses its route segments before the repository is
//! touched, so invalid input never reaches the filesystem.

pub mod create_version;
pub mod get_version;
pub mod list_versions;

// Re-exports
pub use create_version::{CreateVersionInput, CreateVersionUseCase};
pub use get_version::GetVersionUseCase;
pub use list_versions::ListVersionsUseCase;
