//! Row models and insert DTOs.

pub mod snapshot;
pub mod system_status;
