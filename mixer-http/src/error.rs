//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mixer_rs::AudioError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Body of every failed response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An error mapped to a status code and a JSON `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(err: impl Display) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }

    pub fn internal(err: impl Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

/// Unknown devices are reported as 500 like every other audio failure.
impl From<AudioError> for ApiError {
    fn from(err: AudioError) -> Self {
        tracing::warn!(kind = ?err.kind(), "{err}");
        Self::internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_internal_error() {
        let err = ApiError::from(AudioError::DeviceNotFound {
            device_id: "abc".to_string(),
        });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "device with id \"abc\" not found");
    }

    #[test]
    fn test_bad_request() {
        let err = ApiError::bad_request(AudioError::InvalidDeviceType("x".to_string()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
