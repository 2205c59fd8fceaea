//! Data models for the weather proxy
//!
//! - Location: validated region codes and coordinates
//! - Alert: upstream alert features and their simplified form
//! - Forecast: grid points, upstream forecast periods and their simplified form

use serde::{Deserialize, Deserializer};

pub mod alert;
pub mod forecast;
pub mod location;

pub use alert::{AlertFeature, AlertRecord, AlertsResponse};
pub use forecast::{ForecastPeriod, ForecastResponse, GridPointResponse, RawForecastPeriod};
pub use location::{Coordinate, LocationError, RegionCode};

/// Treats an explicit `null` like a missing field.
///
/// Pair with `#[serde(default)]` so absent fields also fall back to `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
