//! TTL cache for lookup results, keyed by normalized (city, country) pairs.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Country sentinel meaning "no country filter".
pub const COUNTRY_ALL: &str = "ALL";

/// Default time a cached result stays servable.
pub const DEFAULT_TTL: Duration = Duration::from_secs(120);

/// Normalized cache identity for a lookup.
///
/// Two keys are equal iff their normalized forms match: the city is trimmed
/// and lowercased, the country uppercased. An absent, empty, or `ALL`
/// country means "no filter" and normalizes to `None`. Callers reject blank
/// cities before constructing a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    city: String,
    country: Option<String>,
}

impl LookupKey {
    pub fn new(city: &str, country: Option<&str>) -> Self {
        let country = country
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(COUNTRY_ALL))
            .map(str::to_uppercase);

        Self {
            city: city.trim().to_lowercase(),
            country,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

impl std::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{},{country}", self.city),
            None => f.write_str(&self.city),
        }
    }
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Expiring key-value store guarded by a mutex.
///
/// Eviction is lazy: an entry whose age exceeds the TTL is removed by the
/// read that discovers it. Writes unconditionally overwrite and restamp.
/// The `_at` variants take an explicit clock reading so tests can drive
/// expiry deterministically.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if now.duration_since(entry.inserted_at) > self.ttl => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    pub fn set(&self, key: K, value: V) {
        self.set_at(key, value, Instant::now());
    }

    pub fn set_at(&self, key: K, value: V, now: Instant) {
        self.lock().insert(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<K, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
