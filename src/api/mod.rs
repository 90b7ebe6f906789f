use std::sync::Arc;

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    response::Json,
    routing::post,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::models::Envelope;
use crate::service::BridgeService;
use crate::{BridgeError, Result};

pub mod response;

pub use response::{ApiResponse, HealthStatus};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BridgeService>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherRequest {
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeoRequest {
    pub address: Option<String>,
}

/// Routes mounted under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mcp/weather", post(get_weather))
        .route("/mcp/geo", post(get_geo))
}

/// Liveness plus how many answers were live or fallback since startup
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        served: state.service.stats(),
    })
}

/// Unwrap a required text field; malformed bodies count as missing.
/// Blank values are rejected, others are forwarded as sent.
fn required<T>(
    payload: std::result::Result<Json<T>, JsonRejection>,
    field: &'static str,
    extract: impl FnOnce(T) -> Option<String>,
) -> Result<String> {
    let value = match payload {
        Ok(Json(request)) => extract(request),
        Err(rejection) => {
            debug!(%rejection, "Rejected request body");
            None
        }
    };

    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| BridgeError::validation(format!("{field} required")))
}

async fn get_weather(
    State(state): State<AppState>,
    payload: std::result::Result<Json<WeatherRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Value>>> {
    let city = required(payload, "city", |request| request.city)?;
    info!("Weather request for city: {}", city);

    let served = state.service.weather(&city).await?;
    let source = served.source;
    let forecast = served
        .envelope
        .into_first()
        .ok_or_else(|| BridgeError::empty_result(format!("no forecast for '{city}'")))?;

    info!(%source, "Served weather for {}", city);
    Ok(Json(ApiResponse::ok(forecast)))
}

async fn get_geo(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GeoRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Value>>> {
    let address = required(payload, "address", |request| request.address)?;
    info!("Geo request for address: {}", address);

    let served = state.service.geo(&address).await?;
    let source = served.source;
    let geocode = served
        .envelope
        .into_first()
        .ok_or_else(|| BridgeError::empty_result(format!("no geocode for '{address}'")))?;

    info!(%source, "Served geocode for {}", address);
    Ok(Json(ApiResponse::ok(geocode)))
}
