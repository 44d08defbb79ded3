//! Geocoding via Nominatim (OpenStreetMap): free-text city search, no API
//! key, but a User-Agent is mandatory.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};

use super::{Geocoder, truncate_body};
use crate::model::Coordinates;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

const USER_AGENT: &str = "weather-lookup-widget/0.1";

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build the geocoding HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchCandidate {
    #[serde(deserialize_with = "lenient_coord")]
    lat: f64,
    #[serde(deserialize_with = "lenient_coord")]
    lon: f64,
}

/// Nominatim serializes coordinates as JSON strings; accept numbers too.
fn lenient_coord<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, city: &str, country: Option<&str>) -> Result<Vec<Coordinates>> {
        let url = format!("{}/search", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("format", "json".to_string()),
            ("q", city.to_string()),
        ];
        if let Some(country) = country {
            query.push(("countrycodes", country.to_lowercase()));
        }

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .context("Failed to send request to the geocoding service")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read the geocoding response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let candidates: Vec<SearchCandidate> =
            serde_json::from_str(&body).context("Failed to parse geocoding JSON")?;

        Ok(candidates
            .into_iter()
            .map(|candidate| Coordinates {
                latitude: candidate.lat,
                longitude: candidate.lon,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn parses_string_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "sofia"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"lat": "42.6977", "lon": "23.3219", "display_name": "Sofia, Bulgaria"},
                {"lat": "42.0", "lon": "24.0", "display_name": "Sofia (village)"}
            ])))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(&server.uri(), TIMEOUT).expect("client builds");
        let candidates = geocoder.search("sofia", None).await.expect("search succeeds");

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].latitude, 42.6977);
        assert_eq!(candidates[0].longitude, 23.3219);
    }

    #[tokio::test]
    async fn parses_numeric_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"lat": 42.7, "lon": 23.3}
            ])))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(&server.uri(), TIMEOUT).expect("client builds");
        let candidates = geocoder.search("sofia", None).await.expect("search succeeds");

        assert_eq!(candidates[0].latitude, 42.7);
        assert_eq!(candidates[0].longitude, 23.3);
    }

    #[tokio::test]
    async fn forwards_country_filter_lowercased() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "london"))
            .and(query_param("countrycodes", "gb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"lat": "51.5074", "lon": "-0.1278"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(&server.uri(), TIMEOUT).expect("client builds");
        let candidates = geocoder
            .search("london", Some("GB"))
            .await
            .expect("search succeeds");

        assert_eq!(candidates.len(), 1);
    }

    #[tokio::test]
    async fn unknown_city_yields_empty_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(&server.uri(), TIMEOUT).expect("client builds");
        let candidates = geocoder
            .search("xyzzyville", None)
            .await
            .expect("search succeeds");

        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(&server.uri(), TIMEOUT).expect("client builds");
        let err = geocoder.search("sofia", None).await.unwrap_err();

        assert!(err.to_string().contains("503"));
    }
}
