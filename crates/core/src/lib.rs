//! Shared domain types for the High Command cache service.
//!
//! Holds the catalogue of tracked data kinds, key extraction for keyed
//! snapshots, campaign expiry rules and the domain error type. No I/O.

pub mod campaigns;
pub mod error;
pub mod kinds;
pub mod status_keys;
pub mod types;
