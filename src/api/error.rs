use crate::errors::ChartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ChartError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChartError::MissingParameter(_)
            | ChartError::InvalidRange(_)
            | ChartError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ChartError::NoData => StatusCode::NOT_FOUND,
            ChartError::FetchFailed { .. }
            | ChartError::DatasetUnavailable(_)
            | ChartError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self) -> ErrorBody {
        let (error, details) = match self {
            ChartError::MissingParameter(name) => (format!("Missing {} parameter", name), None),
            ChartError::InvalidRange(value) => ("Invalid range parameter".to_string(), Some(value)),
            ChartError::InvalidQuery(details) => ("Invalid query parameters".to_string(), Some(details)),
            ChartError::FetchFailed { details } => ("Failed to fetch stock data".to_string(), Some(details)),
            ChartError::NoData => ("Invalid symbol or no data available".to_string(), None),
            ChartError::DatasetUnavailable(details) => ("Company dataset unavailable".to_string(), Some(details)),
            ChartError::Config(details) => ("Server misconfigured".to_string(), Some(details)),
        };
        ErrorBody { error, details }
    }
}

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(self.into_body())).into_response()
    }
}
