//! Validated request inputs: region codes and coordinates

use std::fmt;

use thiserror::Error;

/// Rejection reasons for user-supplied locations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("State code must be 2 letters")]
    InvalidRegion,

    #[error("Valid latitude and longitude are required")]
    InvalidCoordinates,

    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange,

    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange,
}

/// Two-character region code, always uppercase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCode(String);

impl RegionCode {
    /// Normalize `input` to uppercase and check its length
    pub fn parse(input: &str) -> Result<Self, LocationError> {
        let code = input.to_uppercase();
        if code.chars().count() != 2 {
            return Err(LocationError::InvalidRegion);
        }
        Ok(Self(code))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, checking each axis range independently
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse raw query values. Missing or non-numeric input is rejected before
    /// any range check.
    pub fn parse(latitude: Option<&str>, longitude: Option<&str>) -> Result<Self, LocationError> {
        let latitude = latitude.and_then(parse_degrees);
        let longitude = longitude.and_then(parse_degrees);

        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon),
            _ => Err(LocationError::InvalidCoordinates),
        }
    }

    /// Format as `lat,lon` with four decimals, the form the points endpoint expects
    #[must_use]
    pub fn to_grid_key(&self) -> String {
        format!("{:.4},{:.4}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

fn parse_degrees(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
