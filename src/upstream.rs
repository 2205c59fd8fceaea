//! HTTP client for the National Weather Service API
//!
//! Every request carries a fixed `User-Agent` and asks for geo-JSON. Failures
//! are classified internally by [`UpstreamError`], but [`WeatherApiClient::get_json`]
//! collapses all of them into `None`: callers only learn whether data is
//! present, not why it is missing.

use std::time::Instant;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::WeatherProxyError;
use crate::config::UpstreamConfig;
use crate::models::{Coordinate, RegionCode};

/// Media type requested from the upstream API
pub const GEO_JSON: &str = "application/geo+json";

/// Why an upstream request produced no data
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Weather API client
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
}

impl WeatherApiClient {
    /// Create a client for the configured base URL and user agent
    pub fn new(config: &UpstreamConfig) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| {
                WeatherProxyError::upstream(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Active alerts for a region
    #[must_use]
    pub fn alerts_url(&self, region: &RegionCode) -> String {
        format!(
            "{}/alerts/active?area={}",
            self.base_url,
            urlencoding::encode(region.as_str())
        )
    }

    /// Grid point metadata for a coordinate
    #[must_use]
    pub fn points_url(&self, coordinate: &Coordinate) -> String {
        format!("{}/points/{}", self.base_url, coordinate.to_grid_key())
    }

    /// Fetch `url` and decode it, or `None` on any failure
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        match self.fetch(url).await {
            Ok(value) => Some(value),
            Err(e) => {
                error!(url, error = %e, "Error making NWS request");
                None
            }
        }
    }

    /// Fetch `url` and decode it, reporting the failure cause
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let start = Instant::now();

        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(
            %status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "NWS response received"
        );

        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
