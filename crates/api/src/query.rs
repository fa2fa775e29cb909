//! Query-string parameters shared by the listing endpoints.

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// `?limit=` on history and feed endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// `?planet_index=&limit=` on the planet-events endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PlanetEventParams {
    pub planet_index: Option<i64>,
    pub limit: Option<i64>,
}

/// Bounds for a `limit` parameter.
#[derive(Debug, Clone, Copy)]
pub struct LimitBounds {
    pub default: i64,
    pub max: i64,
}

pub const PLANET_HISTORY_LIMIT: LimitBounds = LimitBounds { default: 10, max: 100 };
pub const STATISTICS_HISTORY_LIMIT: LimitBounds = LimitBounds { default: 100, max: 1000 };
pub const FEED_LIMIT: LimitBounds = LimitBounds { default: 10, max: 100 };

impl LimitBounds {
    /// Apply the default, rejecting values outside `1..=max`.
    pub fn resolve(self, requested: Option<i64>) -> AppResult<i64> {
        match requested {
            None => Ok(self.default),
            Some(n) if (1..=self.max).contains(&n) => Ok(n),
            Some(n) => Err(AppError::BadRequest(format!(
                "limit must be between 1 and {}, got {n}",
                self.max
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_applies_when_absent() {
        assert_eq!(PLANET_HISTORY_LIMIT.resolve(None).unwrap(), 10);
        assert_eq!(STATISTICS_HISTORY_LIMIT.resolve(None).unwrap(), 100);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(FEED_LIMIT.resolve(Some(1)).unwrap(), 1);
        assert_eq!(FEED_LIMIT.resolve(Some(100)).unwrap(), 100);
        assert_matches!(FEED_LIMIT.resolve(Some(0)), Err(AppError::BadRequest(_)));
        assert_matches!(FEED_LIMIT.resolve(Some(101)), Err(AppError::BadRequest(_)));
    }
}
