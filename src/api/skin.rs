//! `GET /api/skin?username=<name>[&debug=1]`

use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::debug;

use super::error::{json_response, ApiError};
use crate::core::resolver::{ResolutionOutcome, ResolutionTrace, TraceEntry};
use crate::core::state::AppState;
use crate::core::username::Username;

/// Body of a successful debug request.
#[derive(Debug, Serialize)]
pub struct DebugSkinResponse {
    pub code: &'static str,
    pub message: &'static str,
    pub bytes: usize,
    pub trace: Vec<TraceEntry>,
}

/// First value for `key`, the way a browser's URLSearchParams reads it.
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

pub async fn get_skin(
    method: Method,
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    if method != Method::GET {
        return ApiError::MethodNotAllowed.into_response();
    }

    let debug_requested = first_param(&params, "debug") == Some("1");
    let mut trace = if debug_requested {
        ResolutionTrace::enabled()
    } else {
        ResolutionTrace::disabled()
    };

    let raw = first_param(&params, "username").unwrap_or_default().trim();
    let Ok(username) = Username::parse(raw) else {
        debug!("Rejected username {raw:?}");
        // A debug request still gets its (empty) trace back.
        return ApiError::InvalidUsername.with_trace(trace.into_entries());
    };
    let outcome = state.resolver.resolve(&username, &mut trace).await;

    match outcome {
        ResolutionOutcome::Ok(bytes) if debug_requested => json_response(
            StatusCode::OK,
            &DebugSkinResponse {
                code: "ok",
                message: "Skin resolved successfully.",
                bytes: bytes.len(),
                trace: trace.into_entries().unwrap_or_default(),
            },
        ),
        ResolutionOutcome::Ok(bytes) => png_response(bytes),
        failure => match ApiError::from_outcome(&failure) {
            Some(err) => err.with_trace(trace.into_entries()),
            None => ApiError::Internal.into_response(),
        },
    }
}

fn png_response(bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (CONTENT_LENGTH, HeaderValue::from(bytes.len())),
            (CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
        bytes,
    )
        .into_response()
}
