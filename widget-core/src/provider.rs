use std::fmt::Debug;

use anyhow::Result;
use async_trait::async_trait;

use crate::Config;
use crate::model::{Coordinates, CurrentWeather, DailyWeather};
use crate::provider::{nominatim::NominatimGeocoder, open_meteo::OpenMeteoProvider};

pub mod nominatim;
pub mod open_meteo;

/// Resolves a free-text city name to candidate coordinates, best first.
///
/// An empty candidate list means the city is unknown to the upstream;
/// transport failures and non-success statuses are errors.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn search(&self, city: &str, country: Option<&str>) -> Result<Vec<Coordinates>>;
}

/// Fetches weather for resolved coordinates.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn current(&self, location: Coordinates) -> Result<CurrentWeather>;

    async fn daily(&self, location: Coordinates) -> Result<DailyWeather>;
}

/// Construct the production geocoder from config.
pub fn geocoder_from_config(config: &Config) -> Result<Box<dyn Geocoder>> {
    let geocoder = NominatimGeocoder::new(&config.geocoder_url, config.upstream_timeout())?;
    Ok(Box::new(geocoder))
}

/// Construct the production forecast provider from config.
pub fn forecast_provider_from_config(config: &Config) -> Result<Box<dyn ForecastProvider>> {
    let provider = OpenMeteoProvider::new(&config.forecast_url, config.upstream_timeout())?;
    Ok(Box::new(provider))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
