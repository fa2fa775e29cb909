//! Well-known `system_status` key constants.
//!
//! These must match the `key` values written by the collector and read by
//! the health endpoint.

/// Whether the upstream API answered the war-status check during the most
/// recent collection cycle.
pub const UPSTREAM_API_AVAILABLE: &str = "upstream_api_available";
