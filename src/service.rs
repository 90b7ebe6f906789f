//! Fallback substitution around a [`MapProvider`]
//!
//! Upstream failures never reach callers: they are replaced with the
//! stand-ins from [`crate::fallback`]. Every substitution is logged at warn
//! level with `source = "fallback"` and counted, so degraded operation stays
//! visible to operators.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::warn;

use crate::models::{GeoEnvelope, WeatherEnvelope};
use crate::provider::MapProvider;
use crate::{BridgeError, Result, fallback};

/// Where a served envelope came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Envelope plus its origin
#[derive(Debug, Clone)]
pub struct Served<T> {
    pub envelope: T,
    pub source: DataSource,
}

/// Counter snapshot, reported on `/health`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServiceStats {
    pub live: u64,
    pub fallback: u64,
}

#[derive(Default)]
struct Counters {
    live: AtomicU64,
    fallback: AtomicU64,
}

/// Weather and geocoding lookups that always produce an envelope
pub struct BridgeService {
    provider: Arc<dyn MapProvider>,
    counters: Counters,
}

impl BridgeService {
    pub fn new(provider: Arc<dyn MapProvider>) -> Self {
        Self {
            provider,
            counters: Counters::default(),
        }
    }

    /// Forecast for `city`, substituting a stand-in on upstream failure
    pub async fn weather(&self, city: &str) -> Result<Served<WeatherEnvelope>> {
        match self.provider.resolve_weather(city).await {
            Ok(envelope) => Ok(self.live(envelope)),
            Err(BridgeError::Upstream { message }) => {
                let served = self.fallback(fallback::fallback_weather(city));
                warn!(
                    city,
                    source = DataSource::Fallback.as_str(),
                    reason = %message,
                    fallback_total = self.stats().fallback,
                    "Weather upstream failed, serving fallback data"
                );
                Ok(served)
            }
            Err(e) => Err(e),
        }
    }

    /// Geocode for `address`, substituting a stand-in on upstream failure
    pub async fn geo(&self, address: &str) -> Result<Served<GeoEnvelope>> {
        match self.provider.resolve_geo(address).await {
            Ok(envelope) => Ok(self.live(envelope)),
            Err(BridgeError::Upstream { message }) => {
                let served = self.fallback(fallback::fallback_geo(address));
                warn!(
                    address,
                    source = DataSource::Fallback.as_str(),
                    reason = %message,
                    fallback_total = self.stats().fallback,
                    "Geo upstream failed, serving fallback data"
                );
                Ok(served)
            }
            Err(e) => Err(e),
        }
    }

    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            live: self.counters.live.load(Ordering::Relaxed),
            fallback: self.counters.fallback.load(Ordering::Relaxed),
        }
    }

    fn live<T>(&self, envelope: T) -> Served<T> {
        self.counters.live.fetch_add(1, Ordering::Relaxed);
        Served {
            envelope,
            source: DataSource::Live,
        }
    }

    fn fallback<T>(&self, envelope: T) -> Served<T> {
        self.counters.fallback.fetch_add(1, Ordering::Relaxed);
        Served {
            envelope,
            source: DataSource::Fallback,
        }
    }
}
