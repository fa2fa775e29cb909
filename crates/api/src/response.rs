//! Response bodies that are not plain upstream documents.

use serde::Serialize;
use serde_json::Value;

/// Body of a successful refresh: `{ "success": true, "data": ... }`.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub data: Value,
}

impl RefreshResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the database does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub collector_running: bool,
    /// `online` if the last collection cycle reached upstream.
    pub upstream_api: &'static str,
    pub db_healthy: bool,
}
