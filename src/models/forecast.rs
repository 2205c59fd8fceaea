//! Forecasts: grid point resolution, upstream period shape and the
//! simplified period returned to clients

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::null_as_default;

/// `GET /points/{lat},{lon}` response
#[derive(Debug, Default, Deserialize)]
pub struct GridPointResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: GridPointProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct GridPointProperties {
    /// URL of the forecast resource for this grid cell
    pub forecast: Option<String>,
}

impl GridPointResponse {
    /// Forecast URL, if the grid point carries a usable one
    #[must_use]
    pub fn forecast_url(&self) -> Option<&str> {
        self.properties
            .forecast
            .as_deref()
            .filter(|url| !url.is_empty())
    }
}

/// Forecast resource response
#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: ForecastProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastProperties {
    #[serde(default, deserialize_with = "null_as_default")]
    pub periods: Vec<RawForecastPeriod>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForecastPeriod {
    pub name: Option<String>,
    /// `None` only when the key is absent; a present `null` is kept as `Value::Null`
    #[serde(default, deserialize_with = "present_value")]
    pub temperature: Option<Value>,
    pub temperature_unit: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub short_forecast: Option<String>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Forecast period as returned to clients
///
/// The temperature is passed through as whatever JSON upstream sent (number,
/// `null`, quantity object), keeping `0` vs `0.0`. Only an absent value is
/// omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Value>,
    pub temperature_unit: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub short_forecast: String,
}

impl From<&RawForecastPeriod> for ForecastPeriod {
    fn from(raw: &RawForecastPeriod) -> Self {
        Self {
            name: raw.name.clone().unwrap_or_else(|| "Unknown".to_string()),
            temperature: raw.temperature.clone(),
            temperature_unit: raw
                .temperature_unit
                .clone()
                .unwrap_or_else(|| "F".to_string()),
            wind_speed: raw
                .wind_speed
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            wind_direction: raw.wind_direction.clone().unwrap_or_default(),
            short_forecast: raw
                .short_forecast
                .clone()
                .unwrap_or_else(|| "No forecast available".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn format(raw: Value) -> Value {
        let period: RawForecastPeriod = serde_json::from_value(raw).unwrap();
        serde_json::to_value(ForecastPeriod::from(&period)).unwrap()
    }

    #[test]
    fn test_format_full_period() {
        let formatted = format(json!({
            "number": 1,
            "name": "Tonight",
            "temperature": 54,
            "temperatureUnit": "F",
            "windSpeed": "5 to 10 mph",
            "windDirection": "SW",
            "shortForecast": "Mostly Clear",
            "detailedForecast": "Mostly clear, with a low around 54."
        }));

        assert_eq!(
            formatted,
            json!({
                "name": "Tonight",
                "temperature": 54,
                "temperatureUnit": "F",
                "windSpeed": "5 to 10 mph",
                "windDirection": "SW",
                "shortForecast": "Mostly Clear"
            })
        );
    }

    #[test]
    fn test_missing_wind_direction_keeps_zero_temperature() {
        let formatted = format(json!({
            "name": "Monday",
            "temperature": 0,
            "temperatureUnit": "F",
            "windSpeed": "10 mph",
            "shortForecast": "Snow"
        }));

        assert_eq!(formatted["windDirection"], json!(""));
        assert_eq!(formatted["temperature"], json!(0));
    }

    #[rstest]
    #[case(json!(-12), json!(-12))]
    #[case(json!(21.5), json!(21.5))]
    #[case(json!(0.0), json!(0.0))]
    fn test_temperature_passes_through(
        #[case] temperature: Value,
        #[case] expected: Value,
    ) {
        let formatted = format(json!({ "temperature": temperature }));
        assert_eq!(formatted["temperature"], expected);
    }

    #[test]
    fn test_temperature_null_and_quantity_pass_through() {
        let null = format(json!({ "name": "Tonight", "temperature": null }));
        assert_eq!(null["temperature"], Value::Null);
        assert!(null.as_object().unwrap().contains_key("temperature"));

        let quantity = json!({ "unitCode": "wmoUnit:degF", "value": 54 });
        let formatted = format(json!({ "temperature": quantity.clone() }));
        assert_eq!(formatted["temperature"], quantity);
    }

    #[test]
    fn test_empty_period_gets_defaults() {
        let formatted = format(json!({}));

        assert_eq!(
            formatted,
            json!({
                "name": "Unknown",
                "temperatureUnit": "F",
                "windSpeed": "Unknown",
                "windDirection": "",
                "shortForecast": "No forecast available"
            })
        );
        assert!(formatted.get("temperature").is_none());
    }

    #[test]
    fn test_grid_point_forecast_url() {
        let point: GridPointResponse = serde_json::from_value(json!({
            "properties": {
                "gridId": "TOP",
                "forecast": "https://api.weather.gov/gridpoints/TOP/31,80/forecast"
            }
        }))
        .unwrap();
        assert_eq!(
            point.forecast_url(),
            Some("https://api.weather.gov/gridpoints/TOP/31,80/forecast")
        );

        let missing: GridPointResponse =
            serde_json::from_value(json!({ "properties": { "gridId": "TOP" } })).unwrap();
        assert_eq!(missing.forecast_url(), None);

        let empty: GridPointResponse =
            serde_json::from_value(json!({ "properties": { "forecast": "" } })).unwrap();
        assert_eq!(empty.forecast_url(), None);
    }

    #[rstest]
    #[case(json!({ "properties": {} }))]
    #[case(json!({ "properties": { "periods": null } }))]
    #[case(json!({ "properties": null }))]
    #[case(json!({}))]
    fn test_missing_or_null_periods_is_empty(#[case] raw: Value) {
        let response: ForecastResponse = serde_json::from_value(raw).unwrap();
        assert!(response.properties.periods.is_empty());
    }

    #[test]
    fn test_null_grid_point_properties_has_no_forecast_url() {
        let point: GridPointResponse =
            serde_json::from_value(json!({ "properties": null })).unwrap();
        assert_eq!(point.forecast_url(), None);
    }
}
