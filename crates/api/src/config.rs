use std::time::Duration;

use axum::http::HeaderValue;
use highcommand_upstream::backoff::BackoffPolicy;
use highcommand_upstream::config::resolve_base_url;
use highcommand_upstream::UpstreamConfig;

/// Deployment environment, selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
    Testing,
}

impl AppEnv {
    /// Collection interval used when `SCRAPE_INTERVAL_SECS` is unset.
    pub fn default_scrape_interval(self) -> Duration {
        match self {
            AppEnv::Production => Duration::from_secs(300),
            AppEnv::Development | AppEnv::Testing => Duration::from_secs(60),
        }
    }
}

/// Output format of the `fmt` tracing layer, selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// A configuration variable had an unusable value.
#[derive(Debug, thiserror::Error)]
#[error("{var} must be {expected}, got '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. The struct is
/// built once at startup and never changes afterwards.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub app_env: AppEnv,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins; `*` allows any origin.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Deadline for the live attempt of a cache-backed read. Shorter than
    /// the request timeout so the cache can still answer.
    pub live_fetch_timeout: Duration,
    /// How long to wait for the collector to finish on shutdown.
    pub shutdown_timeout_secs: u64,
    pub database_url: String,
    /// Time between collection cycles.
    pub scrape_interval: Duration,
    pub upstream: UpstreamConfig,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                   | Default                                   |
    /// |---------------------------|-------------------------------------------|
    /// | `APP_ENV`                 | `development`                             |
    /// | `HOST`                    | `0.0.0.0`                                 |
    /// | `PORT`                    | `5000`                                    |
    /// | `CORS_ORIGINS`            | `*`                                       |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                                      |
    /// | `LIVE_FETCH_TIMEOUT_SECS` | `10` (must be below the request timeout)  |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `10`                                      |
    /// | `DATABASE_URL`            | `sqlite://helldivers2.db?mode=rwc`        |
    /// | `SCRAPE_INTERVAL_SECS`    | `300` in production, `60` otherwise       |
    /// | `HELLDIVERS_API_BASE`     | production upstream (`NA` = default)      |
    /// | `X_SUPER_CLIENT`          | `high-command`                            |
    /// | `X_SUPER_CONTACT`         | `unknown`                                 |
    /// | `API_TIMEOUT_SECS`        | `30`                                      |
    /// | `UPSTREAM_MIN_INTERVAL_MS`| `2000`                                    |
    /// | `LOG_FORMAT`              | `text` (`json`)                           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let app_env = match var("APP_ENV").as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("development") => AppEnv::Development,
            Some("production") => AppEnv::Production,
            Some("testing") => AppEnv::Testing,
            Some(other) => {
                return Err(ConfigError {
                    var: "APP_ENV",
                    expected: "development, production or testing",
                    value: other.to_string(),
                })
            }
        };

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(var("PORT"), "PORT", "a valid u16", 5000)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in cors_origins.iter().filter(|o| o.as_str() != "*") {
            if HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError {
                    var: "CORS_ORIGINS",
                    expected: "a comma-separated list of origins",
                    value: origin.clone(),
                });
            }
        }

        let request_timeout_secs = parse_or(
            var("REQUEST_TIMEOUT_SECS"),
            "REQUEST_TIMEOUT_SECS",
            "a valid u64",
            30,
        )?;
        let live_fetch_timeout_secs: u64 = parse_or(
            var("LIVE_FETCH_TIMEOUT_SECS"),
            "LIVE_FETCH_TIMEOUT_SECS",
            "a valid u64",
            10,
        )?;
        if live_fetch_timeout_secs == 0 || live_fetch_timeout_secs >= request_timeout_secs {
            return Err(ConfigError {
                var: "LIVE_FETCH_TIMEOUT_SECS",
                expected: "a positive number of seconds below REQUEST_TIMEOUT_SECS",
                value: live_fetch_timeout_secs.to_string(),
            });
        }
        let shutdown_timeout_secs = parse_or(
            var("SHUTDOWN_TIMEOUT_SECS"),
            "SHUTDOWN_TIMEOUT_SECS",
            "a valid u64",
            10,
        )?;

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://helldivers2.db?mode=rwc".into());

        let scrape_interval = match var("SCRAPE_INTERVAL_SECS") {
            Some(raw) => Duration::from_secs(parse_or(
                Some(raw),
                "SCRAPE_INTERVAL_SECS",
                "a positive number of seconds",
                0,
            )?),
            None => app_env.default_scrape_interval(),
        };
        if scrape_interval.is_zero() {
            return Err(ConfigError {
                var: "SCRAPE_INTERVAL_SECS",
                expected: "a positive number of seconds",
                value: "0".into(),
            });
        }

        let defaults = UpstreamConfig::default();
        let upstream = UpstreamConfig {
            base_url: resolve_base_url(var("HELLDIVERS_API_BASE").as_deref()),
            client_name: var("X_SUPER_CLIENT").unwrap_or(defaults.client_name),
            contact: var("X_SUPER_CONTACT").unwrap_or(defaults.contact),
            timeout: Duration::from_secs(parse_or(
                var("API_TIMEOUT_SECS"),
                "API_TIMEOUT_SECS",
                "a valid u64",
                30,
            )?),
            min_interval: Duration::from_millis(parse_or(
                var("UPSTREAM_MIN_INTERVAL_MS"),
                "UPSTREAM_MIN_INTERVAL_MS",
                "a valid u64",
                2000,
            )?),
            backoff: BackoffPolicy::default(),
            user_agent: defaults.user_agent,
        };

        let log_format = match var("LOG_FORMAT").as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError {
                    var: "LOG_FORMAT",
                    expected: "text or json",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            app_env,
            host,
            port,
            cors_origins,
            request_timeout_secs,
            live_fetch_timeout: Duration::from_secs(live_fetch_timeout_secs),
            shutdown_timeout_secs,
            database_url,
            scrape_interval,
            upstream,
            log_format,
        })
    }

    /// Whether `CORS_ORIGINS` allows any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse();
            parsed.map_err(|_| ConfigError {
                var,
                expected,
                value,
            })
        }
    }
}
