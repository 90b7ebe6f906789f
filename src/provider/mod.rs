//! Upstream map provider abstraction

use async_trait::async_trait;

use crate::Result;
use crate::models::{GeoEnvelope, WeatherEnvelope};

pub mod amap;

pub use amap::AmapClient;

/// Live lookups against a map provider.
///
/// Implementations report every transport, HTTP or provider-status anomaly as
/// [`BridgeError::Upstream`](crate::BridgeError::Upstream); other error kinds
/// are treated as bugs by the caller.
#[async_trait]
pub trait MapProvider: Send + Sync {
    /// Geocode a free-text address.
    ///
    /// A successful answer with zero geocodes is returned as is.
    async fn resolve_geo(&self, address: &str) -> Result<GeoEnvelope>;

    /// Forecast for a free-text place name, resolved through its admin code.
    async fn resolve_weather(&self, city: &str) -> Result<WeatherEnvelope>;
}
