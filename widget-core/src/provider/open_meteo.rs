//! Forecasts via Open-Meteo: no API key, current conditions and daily
//! aggregates keyed by the requested field names.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use super::{ForecastProvider, truncate_body};
use crate::model::{Coordinates, CurrentWeather, DailyWeather};

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com";

/// Fields requested for a current-conditions lookup. The response echoes
/// values under exactly these names.
const CURRENT_FIELDS: &str =
    "temperature_2m,wind_speed_10m,relative_humidity_2m,is_day,cloud_cover,rain,showers,snowfall";

/// Fields requested for the daily forecast.
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,wind_speed_10m_max";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    base_url: String,
}

impl OpenMeteoProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the forecast HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_forecast(&self, query: &[(&str, String)]) -> Result<String> {
        let url = format!("{}/v1/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .context("Failed to send request to the forecast service")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read the forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentResponse {
    #[serde(default)]
    current: OmCurrent,
}

// Fields the upstream omits stay `None`; the reshaped result carries them
// through as absent rather than zero.
#[derive(Debug, Default, Deserialize)]
struct OmCurrent {
    temperature_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    is_day: Option<u8>,
    cloud_cover: Option<f64>,
    rain: Option<f64>,
    showers: Option<f64>,
    snowfall: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmDailyResponse {
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<NaiveDate>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m_max: Vec<Option<f64>>,
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn current(&self, location: Coordinates) -> Result<CurrentWeather> {
        let body = self
            .fetch_forecast(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .await?;

        let parsed: OmCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse the current-conditions JSON")?;
        let current = parsed.current;

        Ok(CurrentWeather {
            is_day: current.is_day,
            temperature: current.temperature_2m,
            windspeed: current.wind_speed_10m,
            relative_humidity: current.relative_humidity_2m,
            cloud_cover: current.cloud_cover,
            rain: current.rain,
            showers: current.showers,
            snowfall: current.snowfall,
        })
    }

    async fn daily(&self, location: Coordinates) -> Result<DailyWeather> {
        let body = self
            .fetch_forecast(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .await?;

        let parsed: OmDailyResponse =
            serde_json::from_str(&body).context("Failed to parse the daily-forecast JSON")?;
        let daily = parsed.daily;

        Ok(DailyWeather {
            temperature_max: daily.temperature_2m_max,
            temperature_min: daily.temperature_2m_min,
            wind_speed_10m_max: daily.wind_speed_10m_max,
            date: daily.time,
        })
    }
}
