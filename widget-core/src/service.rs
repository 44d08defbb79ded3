//! Lookup orchestration: validate → normalize → cache check → geocode →
//! fetch → reshape → cache write, with an error terminal reachable from
//! every step.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use thiserror::Error;

use crate::cache::{LookupKey, TtlCache};
use crate::classify::ConditionsSummary;
use crate::model::{Coordinates, CurrentWeather, DailyWeather};
use crate::provider::{ForecastProvider, Geocoder};

/// How a lookup can fail. The HTTP boundary maps each kind to exactly one
/// response; nothing here ever leaks upstream payloads to clients.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The submitted city is empty or blank after trimming.
    #[error("city name is empty")]
    InvalidInput,

    /// The geocoder returned zero candidates for the city.
    #[error("no geocoding candidates for the requested city")]
    CityNotFound,

    /// An upstream call failed, timed out, or answered non-success.
    #[error("upstream lookup failed")]
    Upstream(#[source] anyhow::Error),

    /// A bug on our side; details are logged, never shown to clients.
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ForecastKind {
    Current,
    Daily,
}

impl ForecastKind {
    fn as_str(self) -> &'static str {
        match self {
            ForecastKind::Current => "current",
            ForecastKind::Daily => "daily",
        }
    }
}

type FlightKey = (ForecastKind, LookupKey);

/// Orchestrates lookups against the geocoding and forecast upstreams,
/// absorbing repeat requests with a per-kind TTL cache.
///
/// Collaborators are injected so tests can run against fakes or a mock
/// server; the cache and in-flight state live on the service instance,
/// not in process-wide globals.
#[derive(Debug)]
pub struct WeatherService {
    geocoder: Box<dyn Geocoder>,
    provider: Box<dyn ForecastProvider>,
    current_cache: TtlCache<LookupKey, CurrentWeather>,
    daily_cache: TtlCache<LookupKey, DailyWeather>,
    in_flight: Mutex<HashMap<FlightKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl WeatherService {
    pub fn new(
        geocoder: Box<dyn Geocoder>,
        provider: Box<dyn ForecastProvider>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            geocoder,
            provider,
            current_cache: TtlCache::new(cache_ttl),
            daily_cache: TtlCache::new(cache_ttl),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Current conditions for a city, served from cache within the TTL.
    pub async fn current(
        &self,
        city: &str,
        country: Option<&str>,
    ) -> Result<CurrentWeather, LookupError> {
        self.lookup(
            ForecastKind::Current,
            &self.current_cache,
            city,
            country,
            |location| async move {
                let conditions = self.provider.current(location).await?;
                tracing::info!(
                    summary = %ConditionsSummary::of(&conditions),
                    "fetched current conditions"
                );
                Ok(conditions)
            },
        )
        .await
    }

    /// Daily forecast for a city, cached under the same TTL as current
    /// conditions but in its own keyspace.
    pub async fn daily(
        &self,
        city: &str,
        country: Option<&str>,
    ) -> Result<DailyWeather, LookupError> {
        self.lookup(
            ForecastKind::Daily,
            &self.daily_cache,
            city,
            country,
            |location| async move { self.provider.daily(location).await },
        )
        .await
    }

    async fn lookup<V, F, Fut>(
        &self,
        kind: ForecastKind,
        cache: &TtlCache<LookupKey, V>,
        city: &str,
        country: Option<&str>,
        fetch: F,
    ) -> Result<V, LookupError>
    where
        V: Clone,
        F: FnOnce(Coordinates) -> Fut,
        Fut: Future<Output = anyhow::Result<V>>,
    {
        if city.trim().is_empty() {
            return Err(LookupError::InvalidInput);
        }
        let key = LookupKey::new(city, country);

        if let Some(hit) = cache.get(&key) {
            tracing::debug!(key = %key, kind = kind.as_str(), "serving lookup from cache");
            return Ok(hit);
        }

        // Concurrent misses for one (kind, key) serialize here: the winner
        // fetches, the rest find its write on the re-check below.
        let flight = self.flight(kind, &key);
        let _in_flight = flight.lock().await;

        if let Some(hit) = cache.get(&key) {
            tracing::debug!(key = %key, kind = kind.as_str(), "coalesced with concurrent lookup");
            return Ok(hit);
        }

        let outcome = self.resolve_and_fetch(&key, fetch).await;
        self.clear_flight(kind, &key);

        // A failed lookup never writes to the cache.
        let value = outcome?;
        cache.set(key, value.clone());
        Ok(value)
    }

    async fn resolve_and_fetch<V, F, Fut>(
        &self,
        key: &LookupKey,
        fetch: F,
    ) -> Result<V, LookupError>
    where
        F: FnOnce(Coordinates) -> Fut,
        Fut: Future<Output = anyhow::Result<V>>,
    {
        let candidates = self
            .geocoder
            .search(key.city(), key.country())
            .await
            .map_err(LookupError::Upstream)?;

        // Ambiguous names are resolved by upstream ranking: first candidate wins.
        let Some(location) = candidates.first().copied() else {
            tracing::debug!(key = %key, "geocoder returned no candidates");
            return Err(LookupError::CityNotFound);
        };

        fetch(location).await.map_err(LookupError::Upstream)
    }

    fn flight(&self, kind: ForecastKind, key: &LookupKey) -> Arc<tokio::sync::Mutex<()>> {
        let mut flights = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        flights.entry((kind, key.clone())).or_default().clone()
    }

    fn clear_flight(&self, kind: ForecastKind, key: &LookupKey) {
        let mut flights = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        flights.remove(&(kind, key.clone()));
    }
}
