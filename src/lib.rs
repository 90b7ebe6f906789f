//! `map-bridge` - HTTP bridge to the AMap weather and geocoding APIs
//!
//! Requests are forwarded to the provider and answered with its first result.
//! When the provider cannot be reached, a schema-identical stand-in is served
//! instead, so callers always receive a complete payload.

pub mod api;
pub mod config;
pub mod error;
pub mod fallback;
pub mod logging;
pub mod models;
pub mod provider;
pub mod service;
pub mod web;

// Re-export core types for public API
pub use crate::config::BridgeConfig;
pub use error::BridgeError;
pub use models::{Envelope, GeoEnvelope, WeatherEnvelope};
pub use provider::{AmapClient, MapProvider};
pub use service::{BridgeService, DataSource, Served, ServiceStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, BridgeError>;
