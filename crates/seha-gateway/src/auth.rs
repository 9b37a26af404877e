// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session authentication for the gateway.
//!
//! Session tokens are read from (checked in order):
//! 1. The session cookie set by `POST /login`
//! 2. An `Authorization: Bearer <token>` header
//!
//! The first token that resolves to a live session wins, so a stale cookie
//! does not shadow a valid bearer token. When none resolves the request is
//! rejected with 401.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use seha_core::{RequestContext, SehaError};

use crate::error::ApiError;
use crate::server::GatewayState;

/// Extracts every candidate session token from the request headers, cookie
/// first.
pub fn session_tokens(headers: &HeaderMap, cookie_name: &str) -> Vec<String> {
    let mut tokens = Vec::with_capacity(2);

    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name)
        && !cookie.value().is_empty()
    {
        tokens.push(cookie.value().to_string());
    }

    if let Some(auth) = headers.typed_get::<Authorization<Bearer>>()
        && !tokens.iter().any(|t| t == auth.token())
    {
        tokens.push(auth.token().to_string());
    }

    tokens
}

/// An authenticated request.
#[derive(Debug)]
pub struct Authenticated {
    pub ctx: RequestContext,
}

impl FromRequestParts<GatewayState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &GatewayState,
    ) -> Result<Self, Self::Rejection> {
        let mut rejection = SehaError::Unauthenticated;
        for token in session_tokens(&parts.headers, &state.cookie.name) {
            match state.service.authenticate(Some(&token)) {
                Ok(ctx) => return Ok(Self { ctx }),
                Err(e) => rejection = e,
            }
        }
        Err(rejection.into())
    }
}
