//! Campaign expiry rules.
//!
//! Upstream campaign records may carry an `expiresAt` RFC 3339 timestamp.
//! A campaign with no expiry, or one that cannot be parsed, is treated as
//! active.

use serde_json::Value;

use crate::types::Timestamp;

/// Field holding a campaign's expiry time.
pub const EXPIRES_AT_FIELD: &str = "expiresAt";

/// Whether the campaign document is still active at `now`.
pub fn is_active(campaign: &Value, now: Timestamp) -> bool {
    match campaign.get(EXPIRES_AT_FIELD).and_then(Value::as_str) {
        Some(raw) => match chrono::DateTime::parse_from_rfc3339(raw) {
            Ok(expires_at) => expires_at > now,
            Err(_) => true,
        },
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use serde_json::json;

    #[test]
    fn future_expiry_is_active() {
        let now = Utc::now();
        let doc = json!({"id": 1, "expiresAt": (now + Duration::days(1)).to_rfc3339()});
        assert!(is_active(&doc, now));
    }

    #[test]
    fn past_expiry_is_inactive() {
        let now = Utc::now();
        let doc = json!({"id": 1, "expiresAt": (now - Duration::days(1)).to_rfc3339()});
        assert!(!is_active(&doc, now));
    }

    #[test]
    fn missing_or_invalid_expiry_counts_as_active() {
        let now = Utc::now();
        assert!(is_active(&json!({"id": 1}), now));
        assert!(is_active(&json!({"id": 1, "expiresAt": "invalid-date-format"}), now));
        assert!(is_active(&json!({"id": 1, "expiresAt": 12345}), now));
    }
}
