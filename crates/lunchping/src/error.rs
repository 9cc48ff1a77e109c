use crate::availability::InvalidScheduleError;
use crate::config::ConfigError;
use crate::geolocation::LocationFailure;
use crate::places::PlacesError;
use crate::recommendation::{SamplerError, SessionError};
use crate::storage::StorageError;
use crate::telemetry::TelemetryError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    BadRequest(String),
    NotFound(String),
    Schedule(InvalidScheduleError),
    Location(LocationFailure),
    Recommendation(SessionError),
    Places(PlacesError),
    Storage(StorageError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Schedule(_) | AppError::Location(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Recommendation(SessionError::Sampler(SamplerError::EmptyPool)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Recommendation(SessionError::InvalidTransition { .. }) => {
                StatusCode::CONFLICT
            }
            AppError::Places(err) => err.status_code(),
            AppError::Storage(StorageError::InvalidKey(_) | StorageError::EmptyUpload) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Storage(StorageError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::BadRequest(message) => write!(f, "bad request: {}", message),
            AppError::NotFound(what) => write!(f, "not found: {}", what),
            AppError::Schedule(err) => write!(f, "invalid schedule: {}", err),
            AppError::Location(err) => write!(f, "location error: {}", err),
            AppError::Recommendation(err) => write!(f, "recommendation error: {}", err),
            AppError::Places(err) => write!(f, "place search error: {}", err),
            AppError::Storage(err) => write!(f, "storage error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::BadRequest(_) | AppError::NotFound(_) => None,
            AppError::Schedule(err) => Some(err),
            AppError::Location(err) => Some(err),
            AppError::Recommendation(err) => Some(err),
            AppError::Places(err) => Some(err),
            AppError::Storage(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<InvalidScheduleError> for AppError {
    fn from(value: InvalidScheduleError) -> Self {
        Self::Schedule(value)
    }
}

impl From<LocationFailure> for AppError {
    fn from(value: LocationFailure) -> Self {
        Self::Location(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Recommendation(value)
    }
}

impl From<SamplerError> for AppError {
    fn from(value: SamplerError) -> Self {
        Self::Recommendation(SessionError::Sampler(value))
    }
}

impl From<PlacesError> for AppError {
    fn from(value: PlacesError) -> Self {
        Self::Places(value)
    }
}

impl From<StorageError> for AppError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
