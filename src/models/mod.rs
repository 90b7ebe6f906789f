//! Wire models for the map provider
//!
//! This module contains the provider DTOs organized by concern:
//! - Envelope: status wrapper shared by every provider response
//! - Entry: read access to single geocode/forecast entries
//!
//! Entries stay raw JSON so that a live answer can be handed to callers
//! exactly as it was received. Only the fields the bridge itself needs are
//! read out of them.

pub mod entry;
pub mod envelope;

// Re-export all public types for convenient access
pub use entry::{adcode, text_field};
pub use envelope::{Envelope, GeoEnvelope, SUCCESS_STATUS, WeatherEnvelope};
