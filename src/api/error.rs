//! Error envelope shared by every endpoint: `{"error": .., "details"?: ..}`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::models::LocationError;

const UNKNOWN_ERROR: &str = "Unknown error";

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Failures a handler can answer with
#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected user input
    #[error(transparent)]
    Validation(#[from] LocationError),

    /// Upstream had nothing for the requested resource
    #[error("{message}")]
    NotFound {
        message: String,
        details: Option<String>,
    },

    /// Upstream call failed or returned unusable data
    #[error("{0}")]
    Upstream(String),

    /// Fault that escaped a handler
    #[error("Internal server error")]
    Internal { details: Option<String> },
}

impl ApiError {
    pub fn not_found<S: Into<String>>(message: S, details: Option<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream(message.into())
    }

    pub fn internal(details: Option<String>) -> Self {
        Self::Internal { details }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn body(&self) -> ErrorBody {
        let details = match self {
            ApiError::NotFound { details, .. } => details.clone(),
            ApiError::Internal { details } => {
                Some(details.clone().unwrap_or_else(|| UNKNOWN_ERROR.to_string()))
            }
            ApiError::Validation(_) | ApiError::Upstream(_) => None,
        };

        ErrorBody {
            error: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
