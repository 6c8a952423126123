//! HTTP error bodies for the skin endpoint.

use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::core::resolver::{ResolutionOutcome, TraceEntry};

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub code: &'static str,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<TraceEntry>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Username must be 3-16 characters: letters, numbers, underscore.")]
    InvalidUsername,

    #[error("Username not found.")]
    UsernameNotFound,

    #[error("Network error while contacting Mojang APIs.")]
    NetworkFailure,

    #[error("Mojang APIs returned an invalid response.")]
    UpstreamFailure,

    #[error("Internal server error.")]
    Internal,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "method_not_allowed",
            Self::InvalidUsername => "invalid_username",
            Self::UsernameNotFound => "username_not_found",
            Self::NetworkFailure => "network_failure",
            Self::UpstreamFailure => "upstream_failure",
            Self::Internal => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidUsername => StatusCode::BAD_REQUEST,
            Self::UsernameNotFound => StatusCode::NOT_FOUND,
            Self::NetworkFailure => StatusCode::SERVICE_UNAVAILABLE,
            Self::UpstreamFailure => StatusCode::BAD_GATEWAY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `None` for a successful outcome.
    pub fn from_outcome(outcome: &ResolutionOutcome) -> Option<Self> {
        match outcome {
            ResolutionOutcome::Ok(_) => None,
            ResolutionOutcome::NotFound => Some(Self::UsernameNotFound),
            ResolutionOutcome::UpstreamFailure => Some(Self::UpstreamFailure),
            ResolutionOutcome::NetworkFailure => Some(Self::NetworkFailure),
        }
    }

    /// Error body with the resolution trace attached when there is one.
    pub fn with_trace(self, trace: Option<Vec<TraceEntry>>) -> Response {
        let body = ErrorResponse {
            code: self.code(),
            message: self.to_string(),
            trace,
        };
        json_response(self.status_code(), &body)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.with_trace(None)
    }
}

/// Serialise `body` with the JSON headers every answer of this API carries.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (
            status,
            [
                (CONTENT_TYPE, "application/json; charset=utf-8"),
                (CACHE_CONTROL, "no-store"),
            ],
            bytes,
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Failed to serialise response body: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
