//! AMap (高德) REST API client
//!
//! Weather is only queryable by admin code, so a weather lookup is a geocode
//! followed by `weatherInfo?extensions=all` for the first geocode's adcode.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::MapProvider;
use crate::config::ProviderConfig;
use crate::models::{Envelope, GeoEnvelope, WeatherEnvelope, entry};
use crate::{BridgeError, Result};

/// HTTP client for the AMap v3 REST endpoints
pub struct AmapClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AmapClient {
    /// Create a new client from provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| BridgeError::config("Provider API key is missing"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("map-bridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BridgeError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn geocode_url(&self, address: &str) -> String {
        format!(
            "{}/v3/geocode/geo?address={}&key={}",
            self.base_url,
            urlencoding::encode(address),
            urlencoding::encode(&self.api_key)
        )
    }

    fn weather_url(&self, adcode: &str) -> String {
        format!(
            "{}/v3/weather/weatherInfo?city={}&key={}&extensions=all",
            self.base_url,
            urlencoding::encode(adcode),
            urlencoding::encode(&self.api_key)
        )
    }

    /// GET `url` and decode the body, mapping every failure to `Upstream`
    async fn fetch<T: DeserializeOwned>(&self, endpoint: &'static str, url: &str) -> Result<T> {
        let start_time = Instant::now();
        debug!(endpoint, "Calling provider");

        let response = self.client.get(url).send().await.map_err(|e| {
            BridgeError::upstream(format!("{endpoint} request failed: {}", e.without_url()))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::upstream(format!(
                "{endpoint} request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body = response.text().await.map_err(|e| {
            BridgeError::upstream(format!("Failed to read {endpoint} response: {}", e.without_url()))
        })?;

        debug!(
            endpoint,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            body = %body,
            "Provider response"
        );

        serde_json::from_str(&body)
            .map_err(|e| BridgeError::upstream(format!("Invalid {endpoint} response: {e}")))
    }
}

fn rejected(endpoint: &str, status: &str, info: &str, infocode: &str) -> BridgeError {
    BridgeError::upstream(format!(
        "{endpoint} rejected by provider: status={status} info={info} infocode={infocode}"
    ))
}

#[async_trait]
impl MapProvider for AmapClient {
    #[instrument(skip(self))]
    async fn resolve_geo(&self, address: &str) -> Result<GeoEnvelope> {
        let envelope: GeoEnvelope = self.fetch("geocode", &self.geocode_url(address)).await?;

        if !envelope.is_success() {
            return Err(rejected(
                "geocode",
                &envelope.status,
                &envelope.info,
                &envelope.infocode,
            ));
        }

        if envelope.geocodes.is_empty() {
            warn!("No geocodes found for '{}'", address);
        } else {
            info!("Found {} geocodes for '{}'", envelope.geocodes.len(), address);
        }

        Ok(envelope)
    }

    #[instrument(skip(self))]
    async fn resolve_weather(&self, city: &str) -> Result<WeatherEnvelope> {
        let geo = self.resolve_geo(city).await?;

        let adcode = geo
            .geocodes
            .first()
            .and_then(entry::adcode)
            .ok_or_else(|| BridgeError::upstream(format!("No admin code found for '{city}'")))?
            .to_string();

        debug!(%adcode, "Resolved admin code");

        let envelope: WeatherEnvelope = self.fetch("weather", &self.weather_url(&adcode)).await?;

        if !envelope.is_success() {
            return Err(rejected(
                "weather",
                &envelope.status,
                &envelope.info,
                &envelope.infocode,
            ));
        }

        info!(
            "Retrieved {} forecasts for '{}' ({})",
            envelope.forecasts.len(),
            city,
            adcode
        );

        Ok(envelope)
    }
}
