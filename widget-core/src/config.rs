use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::provider::{nominatim::NOMINATIM_URL, open_meteo::OPEN_METEO_URL};
use crate::{cache, rate_limit};

/// Server and service tunables, stored on disk as TOML.
///
/// Every field has a default, so a missing config file means "run with
/// defaults" rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server binds.
    pub bind_addr: String,

    /// Frontend origin allowed by CORS.
    pub allowed_origin: String,

    /// Seconds a cached lookup result stays servable.
    pub cache_ttl_secs: u64,

    /// Rate-limit window length, seconds.
    pub rate_limit_window_secs: u64,

    /// Requests allowed per client identity per window.
    pub rate_limit_max_requests: u32,

    /// Upper bound on each upstream call, seconds.
    pub upstream_timeout_secs: u64,

    /// Geocoding service base URL (overridable for tests).
    pub geocoder_url: String,

    /// Forecast service base URL (overridable for tests).
    pub forecast_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            allowed_origin: "http://localhost:5173".to_string(),
            cache_ttl_secs: cache::DEFAULT_TTL.as_secs(),
            rate_limit_window_secs: rate_limit::DEFAULT_WINDOW.as_secs(),
            rate_limit_max_requests: rate_limit::DEFAULT_MAX_REQUESTS,
            upstream_timeout_secs: 10,
            geocoder_url: NOMINATIM_URL.to_string(),
            forecast_url: OPEN_METEO_URL.to_string(),
        }
    }
}

impl Config {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Load config from the platform config directory, or return defaults
    /// if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit path; here a missing file is an error,
    /// since the operator asked for that exact file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-widget", "widget-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let cfg = Config::default();

        assert_eq!(cfg.cache_ttl(), Duration::from_secs(120));
        assert_eq!(cfg.rate_limit_window(), Duration::from_secs(900));
        assert_eq!(cfg.rate_limit_max_requests, 100);
        assert_eq!(cfg.upstream_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.geocoder_url, NOMINATIM_URL);
        assert_eq!(cfg.forecast_url, OPEN_METEO_URL);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let cfg: Config = toml::from_str(
            r#"
            cache_ttl_secs = 300
            allowed_origin = "https://weather.example"
            "#,
        )
        .expect("parses");

        assert_eq!(cfg.cache_ttl(), Duration::from_secs(300));
        assert_eq!(cfg.allowed_origin, "https://weather.example");
        assert_eq!(cfg.rate_limit_max_requests, 100);
        assert_eq!(cfg.bind_addr, "127.0.0.1:3000");
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let cfg = Config::default();
        let rendered = toml::to_string_pretty(&cfg).expect("serializes");
        let parsed: Config = toml::from_str(&rendered).expect("parses");

        assert_eq!(parsed.cache_ttl_secs, cfg.cache_ttl_secs);
        assert_eq!(parsed.geocoder_url, cfg.geocoder_url);
    }

    #[test]
    fn load_from_missing_file_is_an_error() {
        let err = Config::load_from(Path::new("/nonexistent/widget-config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
