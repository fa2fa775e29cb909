//! What can be fetched from upstream, and the [`Upstream`] seam.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::UpstreamError;

/// Expected top-level JSON shape of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    Array,
}

impl Shape {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Shape::Object => value.is_object(),
            Shape::Array => value.is_array(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Object => f.write_str("object"),
            Shape::Array => f.write_str("array"),
        }
    }
}

/// One upstream resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    WarStatus,
    Planets,
    Planet(i64),
    Statistics,
    Campaigns,
    Factions,
    Biomes,
    Assignments,
    Dispatches,
    PlanetEvents,
}

impl Target {
    /// Path relative to the configured base URL.
    pub fn path(self) -> String {
        match self {
            Target::WarStatus => "/status".to_string(),
            Target::Planets => "/planets".to_string(),
            Target::Planet(index) => format!("/planets/{index}"),
            Target::Statistics => "/statistics".to_string(),
            Target::Campaigns => "/campaigns".to_string(),
            Target::Factions => "/factions".to_string(),
            Target::Biomes => "/biomes".to_string(),
            Target::Assignments => "/assignments".to_string(),
            Target::Dispatches => "/dispatches".to_string(),
            Target::PlanetEvents => "/planet-events".to_string(),
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            Target::WarStatus | Target::Statistics | Target::Planet(_) => Shape::Object,
            _ => Shape::Array,
        }
    }

    /// Short name used in log fields.
    pub fn name(self) -> &'static str {
        match self {
            Target::WarStatus => "war_status",
            Target::Planets => "planets",
            Target::Planet(_) => "planet_status",
            Target::Statistics => "statistics",
            Target::Campaigns => "campaigns",
            Target::Factions => "factions",
            Target::Biomes => "biomes",
            Target::Assignments => "assignments",
            Target::Dispatches => "dispatches",
            Target::PlanetEvents => "planet_events",
        }
    }
}

/// Source of upstream documents.
///
/// Implementors supply [`fetch`](Upstream::fetch); the per-resource
/// methods are thin wrappers over it. An `Err` always means "unavailable".
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(&self, target: Target) -> Result<Value, UpstreamError>;

    async fn war_status(&self) -> Result<Value, UpstreamError> {
        self.fetch(Target::WarStatus).await
    }

    async fn planets(&self) -> Result<Value, UpstreamError> {
        self.fetch(Target::Planets).await
    }

    async fn planet_status(&self, index: i64) -> Result<Value, UpstreamError> {
        self.fetch(Target::Planet(index)).await
    }

    async fn statistics(&self) -> Result<Value, UpstreamError> {
        self.fetch(Target::Statistics).await
    }

    async fn campaigns(&self) -> Result<Value, UpstreamError> {
        self.fetch(Target::Campaigns).await
    }

    async fn factions(&self) -> Result<Value, UpstreamError> {
        self.fetch(Target::Factions).await
    }

    async fn biomes(&self) -> Result<Value, UpstreamError> {
        self.fetch(Target::Biomes).await
    }

    async fn assignments(&self) -> Result<Value, UpstreamError> {
        self.fetch(Target::Assignments).await
    }

    async fn dispatches(&self) -> Result<Value, UpstreamError> {
        self.fetch(Target::Dispatches).await
    }

    async fn planet_events(&self) -> Result<Value, UpstreamError> {
        self.fetch(Target::PlanetEvents).await
    }
}
