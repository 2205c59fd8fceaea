//! Weather alerts: upstream feature shape and the simplified record

use serde::{Deserialize, Serialize};

use super::null_as_default;

const UNKNOWN: &str = "Unknown";
const NO_HEADLINE: &str = "No headline";

/// `GET /alerts/active?area=..` response
#[derive(Debug, Default, Deserialize)]
pub struct AlertsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: AlertProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProperties {
    pub event: Option<String>,
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub headline: Option<String>,
}

/// Alert as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRecord {
    pub event: String,
    pub area: String,
    pub severity: String,
    pub status: String,
    pub headline: String,
}

impl From<&AlertFeature> for AlertRecord {
    fn from(feature: &AlertFeature) -> Self {
        let props = &feature.properties;
        let or_unknown =
            |field: &Option<String>| field.clone().unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            event: or_unknown(&props.event),
            area: or_unknown(&props.area_desc),
            severity: or_unknown(&props.severity),
            status: or_unknown(&props.status),
            headline: props
                .headline
                .clone()
                .unwrap_or_else(|| NO_HEADLINE.to_string()),
        }
    }
}
