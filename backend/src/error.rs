//! Error types for the session layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chess_engine::{MoveError, SetupError};
use serde_json::json;
use thiserror::Error;

/// Invalid configuration value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Session registry failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Session {0} not found")]
    NotFound(String),

    #[error("Session {0} already exists")]
    Duplicate(String),

    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// Errors returned by HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Move rejected by the rules
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Registry(RegistryError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Registry(RegistryError::Duplicate(_)) => StatusCode::CONFLICT,
            ApiError::Registry(RegistryError::Setup(_)) => StatusCode::BAD_REQUEST,
            ApiError::Move(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(RegistryError::NotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(RegistryError::Duplicate("x".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(MoveError::GameOver).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(RegistryError::from(SetupError::PlayerCount(3))).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
