use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::{ApiError, AppState};
use crate::models::{AlertRecord, AlertsResponse, RegionCode};

/// Body of `GET /api/alerts/{state}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsBody {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_count: Option<usize>,
    pub alerts: Vec<AlertRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[instrument(skip_all, fields(state = %raw_state))]
pub async fn get_alerts(
    State(state): State<AppState>,
    Path(raw_state): Path<String>,
) -> Result<Json<AlertsBody>, ApiError> {
    let region = RegionCode::parse(&raw_state).inspect_err(|e| {
        warn!(input = %raw_state, "Rejected region code: {e}");
    })?;

    let url = state.client.alerts_url(&region);
    let response: AlertsResponse = state
        .client
        .get_json(&url)
        .await
        .ok_or_else(|| ApiError::upstream("Failed to retrieve alerts data"))?;

    if response.features.is_empty() {
        info!(state = %region, "No active alerts");
        return Ok(Json(AlertsBody {
            message: Some(format!("No active alerts for {region}")),
            state: region.to_string(),
            alert_count: None,
            alerts: Vec::new(),
        }));
    }

    let alerts: Vec<AlertRecord> = response.features.iter().map(AlertRecord::from).collect();
    info!(state = %region, count = alerts.len(), "Alerts retrieved");

    Ok(Json(AlertsBody {
        state: region.to_string(),
        alert_count: Some(alerts.len()),
        alerts,
        message: None,
    }))
}
