//! Local stand-in for the AMap REST API

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use map_bridge::config::{ProviderConfig, ServerConfig};
use map_bridge::{AmapClient, BridgeService, web};
use serde_json::{Value, json};

pub const API_KEY: &str = "test-key";

/// Nothing listens here
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

#[derive(Clone, Default)]
pub struct UpstreamCalls {
    geocode: Arc<AtomicUsize>,
    weather: Arc<AtomicUsize>,
}

impl UpstreamCalls {
    pub fn geocode(&self) -> usize {
        self.geocode.load(Ordering::SeqCst)
    }

    pub fn weather(&self) -> usize {
        self.weather.load(Ordering::SeqCst)
    }
}

pub fn pudong_geocode() -> Value {
    json!({
        "formatted_address": "上海市浦东新区",
        "country": "中国",
        "province": "上海市",
        "citycode": "021",
        "city": "上海市",
        "district": "浦东新区",
        "township": [],
        "neighborhood": {"name": [], "type": []},
        "building": {"name": [], "type": []},
        "adcode": "310115",
        "street": [],
        "number": [],
        "location": "121.544346,31.221461",
        "level": "区县"
    })
}

pub fn beijing_geocode() -> Value {
    json!({
        "formatted_address": "北京市",
        "country": "中国",
        "province": "北京市",
        "citycode": "010",
        "city": "北京市",
        "district": [],
        "township": [],
        "neighborhood": {"name": [], "type": []},
        "building": {"name": [], "type": []},
        "adcode": "110000",
        "street": [],
        "number": [],
        "location": "116.407387,39.904179",
        "level": "省"
    })
}

pub fn beijing_forecast() -> Value {
    json!({
        "city": "北京市",
        "adcode": "110000",
        "province": "北京",
        "reporttime": "2024-06-03 11:02:15",
        "casts": [
            {
                "date": "2024-06-03", "week": "1",
                "dayweather": "多云", "nightweather": "晴",
                "daytemp": "33", "nighttemp": "20",
                "daywind": "西南", "nightwind": "西南",
                "daypower": "1-3", "nightpower": "1-3",
                "daytemp_float": "33.0", "nighttemp_float": "20.0"
            },
            {
                "date": "2024-06-04", "week": "2",
                "dayweather": "晴", "nightweather": "晴",
                "daytemp": "35", "nighttemp": "21",
                "daywind": "南", "nightwind": "南",
                "daypower": "1-3", "nightpower": "1-3",
                "daytemp_float": "35.0", "nighttemp_float": "21.0"
            }
        ]
    })
}

/// Only the fields AMap always fills in
pub fn sparse_geocode() -> Value {
    json!({
        "formatted_address": "广东省深圳市南山区",
        "province": "广东省",
        "city": "深圳市",
        "adcode": "440305",
        "location": "113.930478,22.533191",
        "level": "区县"
    })
}

pub fn null_township_geocode() -> Value {
    json!({
        "formatted_address": "浙江省杭州市西湖区",
        "country": "中国",
        "province": "浙江省",
        "citycode": "0571",
        "city": "杭州市",
        "district": "西湖区",
        "township": null,
        "adcode": "330106",
        "street": [],
        "location": "120.130396,30.259242",
        "level": "区县"
    })
}

/// Forecast with null and missing values, as sent for some districts
pub fn sparse_forecast() -> Value {
    json!({
        "city": "南山区",
        "adcode": "440305",
        "province": "广东",
        "reporttime": null,
        "casts": [
            {"date": "2024-06-03", "week": "1", "dayweather": "雷阵雨", "nightpower": null}
        ]
    })
}

fn envelope(key: &str, entries: Vec<Value>) -> Value {
    let mut envelope = json!({
        "status": "1",
        "info": "OK",
        "infocode": "10000",
        "count": entries.len().to_string(),
    });
    envelope[key] = Value::Array(entries);
    envelope
}

async fn geocode(
    State(calls): State<UpstreamCalls>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    calls.geocode.fetch_add(1, Ordering::SeqCst);

    if params.get("key").map(String::as_str) != Some(API_KEY) {
        return Json(json!({"status": "0", "info": "INVALID_USER_KEY", "infocode": "10001"}))
            .into_response();
    }

    match params.get("address").map(String::as_str).unwrap_or_default() {
        "上海市浦东新区" => Json(envelope("geocodes", vec![pudong_geocode()])).into_response(),
        "北京" => Json(envelope("geocodes", vec![beijing_geocode()])).into_response(),
        "深圳南山" => Json(envelope("geocodes", vec![sparse_geocode()])).into_response(),
        "杭州西湖" => Json(envelope("geocodes", vec![null_township_geocode()])).into_response(),
        "无名之地" => Json(envelope("geocodes", Vec::new())).into_response(),
        "上海超时" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(envelope("geocodes", vec![pudong_geocode()])).into_response()
        }
        "广州故障" => (StatusCode::BAD_GATEWAY, "bad gateway").into_response(),
        "广州乱码" => "<html>not json</html>".into_response(),
        _ => Json(json!({"status": "0", "info": "ENGINE_RESPONSE_DATA_ERROR", "infocode": "30001"}))
            .into_response(),
    }
}

async fn weather_info(
    State(calls): State<UpstreamCalls>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    calls.weather.fetch_add(1, Ordering::SeqCst);

    if params.get("extensions").map(String::as_str) != Some("all") {
        return (StatusCode::BAD_REQUEST, "extensions=all expected").into_response();
    }

    match params.get("city").map(String::as_str) {
        Some("110000") => Json(envelope("forecasts", vec![beijing_forecast()])).into_response(),
        Some("440305") => Json(envelope("forecasts", vec![sparse_forecast()])).into_response(),
        _ => Json(json!({"status": "0", "info": "INVALID_PARAMS", "infocode": "20000"}))
            .into_response(),
    }
}

/// Serve the stand-in API on an ephemeral port and return its base URL
pub async fn spawn_upstream() -> (String, UpstreamCalls) {
    let calls = UpstreamCalls::default();
    let app = Router::new()
        .route("/v3/geocode/geo", get(geocode))
        .route("/v3/weather/weatherInfo", get(weather_info))
        .with_state(calls.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), calls)
}

pub fn provider_config(base_url: &str) -> ProviderConfig {
    ProviderConfig {
        api_key: Some(API_KEY.to_string()),
        base_url: base_url.to_string(),
        timeout_seconds: 1,
    }
}

pub fn client(base_url: &str) -> AmapClient {
    AmapClient::new(&provider_config(base_url)).unwrap()
}

pub fn bridge_service(base_url: &str) -> Arc<BridgeService> {
    Arc::new(BridgeService::new(Arc::new(client(base_url))))
}

pub fn app(service: Arc<BridgeService>) -> Router {
    web::app(service, &ServerConfig::default())
}

pub fn app_with(service: Arc<BridgeService>, config: &ServerConfig) -> Router {
    web::app(service, config)
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
