use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::{ApiError, AppState};
use crate::models::{
    Coordinate, ForecastPeriod, ForecastResponse, GridPointResponse, LocationError,
};

const OUTSIDE_COVERAGE: &str =
    "This location may not be supported by the NWS API (only US locations are supported)";

/// Raw query string; values stay strings so bad input gets our own 400
#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Body of `GET /api/forecast`
#[derive(Debug, Serialize)]
pub struct ForecastBody {
    pub latitude: f64,
    pub longitude: f64,
    pub periods: Vec<ForecastPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[instrument(skip_all)]
pub async fn get_forecast(
    State(state): State<AppState>,
    params: Result<Query<ForecastParams>, QueryRejection>,
) -> Result<Json<ForecastBody>, ApiError> {
    let coordinate = parse_coordinate(params).inspect_err(|e| {
        warn!("Rejected coordinates: {e}");
    })?;

    let points_url = state.client.points_url(&coordinate);
    let grid_point: GridPointResponse =
        state.client.get_json(&points_url).await.ok_or_else(|| {
            ApiError::not_found(
                format!("Unable to retrieve grid point data for coordinates: {coordinate}"),
                Some(OUTSIDE_COVERAGE.to_string()),
            )
        })?;

    let forecast_url = grid_point
        .forecast_url()
        .ok_or_else(|| ApiError::upstream("Failed to get forecast URL from grid point data"))?;

    let forecast: ForecastResponse = state
        .client
        .get_json(forecast_url)
        .await
        .ok_or_else(|| ApiError::upstream("Failed to retrieve forecast data"))?;

    let Coordinate {
        latitude,
        longitude,
    } = coordinate;

    if forecast.properties.periods.is_empty() {
        info!(%coordinate, "Forecast has no periods");
        return Ok(Json(ForecastBody {
            latitude,
            longitude,
            periods: Vec::new(),
            message: Some("No forecast periods available".to_string()),
        }));
    }

    let periods: Vec<ForecastPeriod> = forecast
        .properties
        .periods
        .iter()
        .map(ForecastPeriod::from)
        .collect();
    info!(%coordinate, count = periods.len(), "Forecast retrieved");

    Ok(Json(ForecastBody {
        latitude,
        longitude,
        periods,
        message: None,
    }))
}

fn parse_coordinate(
    params: Result<Query<ForecastParams>, QueryRejection>,
) -> Result<Coordinate, LocationError> {
    let Query(params) = params.map_err(|_| LocationError::InvalidCoordinates)?;
    Coordinate::parse(params.latitude.as_deref(), params.longitude.as_deref())
}
