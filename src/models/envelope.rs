//! Provider response envelopes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `status` value the provider uses for success
pub const SUCCESS_STATUS: &str = "1";

/// Common view over the provider's status wrapper
pub trait Envelope {
    fn status(&self) -> &str;

    fn entries(&self) -> &[Value];

    fn into_entries(self) -> Vec<Value>;

    fn is_success(&self) -> bool {
        self.status() == SUCCESS_STATUS
    }

    /// Successful and carrying at least one entry
    fn has_results(&self) -> bool {
        self.is_success() && !self.entries().is_empty()
    }

    /// First entry of a successful envelope, untouched
    fn into_first(self) -> Option<Value>
    where
        Self: Sized,
    {
        if self.is_success() {
            self.into_entries().into_iter().next()
        } else {
            None
        }
    }
}

/// Answer of `v3/geocode/geo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub infocode: String,
    #[serde(default)]
    pub count: String,
    #[serde(default)]
    pub geocodes: Vec<Value>,
}

/// Answer of `v3/weather/weatherInfo` with `extensions=all`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub infocode: String,
    #[serde(default)]
    pub count: String,
    #[serde(default)]
    pub forecasts: Vec<Value>,
}

impl Envelope for GeoEnvelope {
    fn status(&self) -> &str {
        &self.status
    }

    fn entries(&self) -> &[Value] {
        &self.geocodes
    }

    fn into_entries(self) -> Vec<Value> {
        self.geocodes
    }
}

impl Envelope for WeatherEnvelope {
    fn status(&self) -> &str {
        &self.status
    }

    fn entries(&self) -> &[Value] {
        &self.forecasts
    }

    fn into_entries(self) -> Vec<Value> {
        self.forecasts
    }
}
