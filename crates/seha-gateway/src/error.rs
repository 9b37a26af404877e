// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from [`SehaError`] to HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use seha_core::SehaError;

use crate::handlers::ErrorResponse;

/// Error returned by gateway handlers. Always rendered as `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError(pub SehaError);

impl From<SehaError> for ApiError {
    fn from(err: SehaError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(SehaError::InvalidRequest(rejection.body_text()))
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            SehaError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Not logged in".into()),
            SehaError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            SehaError::Upstream { message, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(ErrorResponse { error })).into_response()
    }
}
