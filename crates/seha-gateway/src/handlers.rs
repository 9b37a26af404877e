// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway API.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};

use seha_core::{EmotionRecord, EmotionState, HealthStatus, PluginAdapter};

use crate::auth::{Authenticated, session_tokens};
use crate::error::ApiError;
use crate::server::GatewayState;

/// Request body for POST /login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Missing and `null` are both treated as blank.
    #[serde(default)]
    pub username: Option<String>,
}

/// Response body for POST /login and POST /logout.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    /// Session token, for clients that do not keep cookies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Raw reply text, annotation included.
    pub response: String,
    /// Parsed annotation, `null` when the reply had none.
    pub emotion_state: Option<EmotionState>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" when every adapter is healthy, "degraded" otherwise.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the gateway started.
    pub uptime_secs: u64,
    /// Conversation store health label.
    pub storage: String,
    /// Model provider health label.
    pub provider: String,
}

/// POST /login
///
/// Blank usernames get `{"success": false}`. Otherwise the session cookie is
/// set and the token is also returned in the body.
pub async fn login(
    State(state): State<GatewayState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let Json(req) = payload?;

    let Some(token) = state
        .service
        .login(req.username.as_deref().unwrap_or_default())
        .await? else {
        return Ok((
            jar,
            Json(LoginResponse {
                success: false,
                session_token: None,
            }),
        ));
    };

    let cookie = Cookie::build((state.cookie.name.clone(), token.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie.secure);

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            success: true,
            session_token: Some(token.0),
        }),
    ))
}

/// POST /logout
///
/// Always succeeds; an unknown or missing token is simply ignored.
pub async fn logout(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Json<LoginResponse>) {
    for token in session_tokens(&headers, &state.cookie.name) {
        state.service.logout(&token);
    }
    let removal = Cookie::build((state.cookie.name.clone(), "")).path("/");
    (
        jar.remove(removal),
        Json(LoginResponse {
            success: true,
            session_token: None,
        }),
    )
}

/// POST /chat
pub async fn chat(
    State(state): State<GatewayState>,
    auth: Authenticated,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    let outcome = state.service.chat(&auth.ctx, &req.message).await?;
    Ok(Json(ChatResponse {
        response: outcome.response,
        emotion_state: outcome.emotion_state,
    }))
}

/// GET /research_data
pub async fn research_data(
    State(state): State<GatewayState>,
    auth: Authenticated,
) -> Result<Json<Vec<EmotionRecord>>, ApiError> {
    let records = state.service.research_data(&auth.ctx).await?;
    Ok(Json(records))
}

/// GET /health
///
/// Unauthenticated. Reports store and provider health.
pub async fn health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let storage = adapter_health(state.service.store().as_ref()).await;
    let provider = adapter_health(state.service.provider().as_ref()).await;
    let status = if storage == HealthStatus::Healthy && provider == HealthStatus::Healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        storage: storage.label().to_string(),
        provider: provider.label().to_string(),
    })
}

async fn adapter_health<A: PluginAdapter + ?Sized>(adapter: &A) -> HealthStatus {
    adapter
        .health_check()
        .await
        .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()))
}
