//! JSON endpoints mounted under `/api`

use axum::{Router, routing::get};

use crate::upstream::WeatherApiClient;

pub mod alerts;
pub mod error;
pub mod forecast;

pub use alerts::AlertsBody;
pub use error::{ApiError, ErrorBody};
pub use forecast::ForecastBody;

/// Shared, immutable per-process state
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: WeatherApiClient,
}

impl AppState {
    #[must_use]
    pub fn new(client: WeatherApiClient) -> Self {
        Self { client }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/alerts/{state}", get(alerts::get_alerts))
        .route("/forecast", get(forecast::get_forecast))
}
