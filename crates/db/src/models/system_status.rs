//! Named service flags (`system_status` table).

use highcommand_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// One flag row. `value` is free text; booleans are stored as `true`/`false`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SystemStatus {
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}

impl SystemStatus {
    /// Interpret the stored value as a boolean flag.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}
