//! `weather-proxy` - HTTP facade over the National Weather Service API
//!
//! Validates region codes and coordinates, calls the upstream API, and
//! reshapes alerts and forecasts into a small JSON schema.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod upstream;
pub mod web;

// Re-export core types for public API
pub use api::{ApiError, AppState};
pub use config::WeatherProxyConfig;
pub use error::WeatherProxyError;
pub use models::{AlertRecord, Coordinate, ForecastPeriod, RegionCode};
pub use upstream::WeatherApiClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherProxyError>;
