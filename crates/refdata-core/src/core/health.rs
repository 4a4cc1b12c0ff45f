//! Health check payload served by both services at `/health`

use serde::{Deserialize, Serialize};

/// System health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Current system status
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
}

impl HealthResponse {
    /// Report `service` at `version` as healthy
    pub fn healthy(service: &str, version: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.to_string(),
            version: version.to_string(),
        }
    }
}
