//! Rate-limited REST client for the upstream war-statistics API.
//!
//! Provides the [`Upstream`] seam used by the collector and the request
//! handlers, the production [`UpstreamClient`] (pacing, 429 backoff, shape
//! checks) and the [`Transport`] abstraction it sends requests through.

pub mod backoff;
pub mod client;
pub mod config;
pub mod error;
pub mod pacing;
pub mod source;
pub mod transport;

pub use client::UpstreamClient;
pub use config::UpstreamConfig;
pub use error::{TransportError, UpstreamError};
pub use source::{Shape, Target, Upstream};
pub use transport::{RawResponse, ReqwestTransport, Transport};
