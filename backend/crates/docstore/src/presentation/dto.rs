//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::version::VersionRecord;

/// Create version request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVersionRequest {
    pub content: String,
    pub author: Option<String>,
}

/// Version list response
#[derive(Debug, Clone, Serialize)]
pub struct VersionListResponse {
    pub success: bool,
    pub versions: Vec<VersionRecord>,
}

/// Single version response
#[derive(Debug, Clone, Serialize)]
pub struct VersionResponse {
    pub success: bool,
    pub version: VersionRecord,
}
